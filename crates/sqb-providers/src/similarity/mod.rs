//! Similarity index implementations

mod in_memory;

#[cfg(feature = "index-chroma")]
mod chroma;

pub use in_memory::InMemorySimilarityIndex;

#[cfg(feature = "index-chroma")]
pub use chroma::ChromaSimilarityIndex;

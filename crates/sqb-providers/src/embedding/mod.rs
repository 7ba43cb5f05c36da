//! Embedding provider implementations

pub mod helpers;
mod null;

#[cfg(feature = "embedding-fastembed")]
mod fastembed;
#[cfg(feature = "embedding-gemini")]
mod gemini;

pub use null::NullEmbeddingProvider;

#[cfg(feature = "embedding-fastembed")]
pub use fastembed::FastEmbedProvider;
#[cfg(feature = "embedding-gemini")]
pub use gemini::GeminiEmbeddingProvider;

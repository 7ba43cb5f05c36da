//! Application-level ports

pub mod registry;

// Re-export the domain port traits so provider crates can depend on one
// import path for both the traits and the registries.
pub use sqb_domain::ports::providers::{
    EmbeddingProvider, SchemaProvider, SimilarityIndex, SqlExecutor, SqlGenerator,
};

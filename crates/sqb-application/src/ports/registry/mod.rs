//! Provider registries
//!
//! Auto-registration for the pluggable providers using linkme distributed
//! slices. Provider implementations register a `...ProviderEntry` via
//! `#[linkme::distributed_slice(...)]`; infrastructure resolves entries by
//! the name carried in configuration. The registries hold factories, not
//! instances - construction happens once, at bootstrap.

mod embedding;
mod generator;
mod similarity;

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
    list_embedding_providers, resolve_embedding_provider,
};
pub use generator::{
    SQL_GENERATORS, SqlGeneratorConfig, SqlGeneratorEntry, list_sql_generators,
    resolve_sql_generator,
};
pub use similarity::{
    SIMILARITY_INDEXES, SimilarityIndexConfig, SimilarityIndexEntry, list_similarity_indexes,
    resolve_similarity_index,
};

//! Provider port traits
//!
//! The five collaborator contracts the query workflow depends on. Each port
//! is object-safe and `Send + Sync`; implementations report failures with
//! the error variant matching the pipeline stage they serve (see
//! [`crate::error::Error`]).

mod embedding;
mod executor;
mod generator;
mod schema;
mod similarity;

pub use embedding::EmbeddingProvider;
pub use executor::SqlExecutor;
pub use generator::SqlGenerator;
pub use schema::SchemaProvider;
pub use similarity::SimilarityIndex;

use crate::error::Result;
use crate::value_objects::{Embedding, SchemaMatch};
use async_trait::async_trait;

/// Similarity Index Interface
///
/// Stores `(id, document, vector)` triples and answers nearest-neighbor
/// queries over the vectors. Upsert semantics are replace-by-id: writing an
/// id that already exists overwrites the previous entry rather than
/// versioning it. The workflow keys entries by database name.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Insert or replace the entry stored under `id`.
    ///
    /// Failure signal: [`crate::error::Error::IndexWrite`].
    async fn upsert(&self, id: &str, document: &str, embedding: &Embedding) -> Result<()>;

    /// Return up to `top_k` nearest neighbors of `query_vector`, closest
    /// first (ascending distance).
    ///
    /// Failure signal: [`crate::error::Error::IndexQuery`].
    async fn search(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<SchemaMatch>>;

    /// Remove the entry stored under `id`. Removing an absent id is not an
    /// error.
    ///
    /// Failure signal: [`crate::error::Error::IndexWrite`].
    async fn delete(&self, id: &str) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;

    /// Health check for the provider. Override with a cheap probe against
    /// the backing store; the default assumes a healthy in-process index.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

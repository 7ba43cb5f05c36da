use crate::error::Result;
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Semantic Embedding Interface
///
/// Maps text to a fixed-length numeric vector. The workflow embeds two kinds
/// of text per run: the schema description and the user question; both must
/// go through the same provider so the vectors are comparable.
///
/// # Default Implementations
///
/// `embed()` delegates to `embed_batch()` with a single item. Providers only
/// need to implement `embed_batch()` unless a single-item fast path exists.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get embedding for a single text (default implementation provided)
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| crate::error::Error::embedding("no embedding returned"))
    }

    /// Get embeddings for multiple texts (must be implemented by provider)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Get the dimensionality of embeddings produced by this provider
    fn dimensions(&self) -> usize;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;

    /// Health check for the provider (default implementation provided)
    async fn health_check(&self) -> Result<()> {
        self.embed("health check").await?;
        Ok(())
    }
}

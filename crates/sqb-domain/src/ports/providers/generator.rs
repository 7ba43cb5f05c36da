use crate::error::Result;
use async_trait::async_trait;

/// SQL Generation Interface
///
/// Two-step contract: compose a prompt from schema context and a question,
/// then map a prompt to a generated SQL statement. Prompt building is pure
/// and cannot fail; generation talks to a model and can.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    /// Compose the model prompt from schema context and the user question.
    fn build_prompt(&self, schema_context: &str, user_query: &str) -> String;

    /// Generate a SQL statement for the prompt.
    ///
    /// The returned string is a bare executable statement: implementations
    /// must strip surrounding code-fence markers and whitespace from raw
    /// model output before returning.
    ///
    /// Failure signal: [`crate::error::Error::Generation`].
    async fn generate_sql(&self, prompt: &str) -> Result<String>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

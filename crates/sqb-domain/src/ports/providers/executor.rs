use crate::error::Result;
use crate::value_objects::QueryRows;
use async_trait::async_trait;

/// SQL Execution Interface
///
/// Runs a statement against the source database and returns column names and
/// row data. Implementations own their connection for their whole lifetime.
///
/// Failure signal: [`crate::error::Error::SqlExecution`], whose message MUST
/// carry the engine's error text unmodified - the statement under execution
/// is model-generated and that message is the user's only diagnostic.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute `sql` and collect the full result set.
    async fn execute(&self, sql: &str) -> Result<QueryRows>;

    /// Release the underlying connection.
    ///
    /// Implementations backed by RAII handles may leave this as the no-op
    /// default and release on drop.
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

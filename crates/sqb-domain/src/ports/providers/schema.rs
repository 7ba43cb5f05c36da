use crate::error::Result;
use async_trait::async_trait;

/// Relational Schema Introspection Interface
///
/// Produces the flattened schema text for a named database, one line per
/// table (`Table: <name> | Columns: <comma-separated columns>`). An empty
/// string is a valid result - a reachable database with zero tables is not
/// a failure.
///
/// Implementations own their connection for their whole lifetime; the
/// workflow never acquires or releases connections per call.
///
/// Failure signal: [`crate::error::Error::SchemaRetrieval`].
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Fetch the schema text for the named database.
    ///
    /// # Arguments
    /// * `database` - Name of the database to introspect
    async fn fetch_schema_text(&self, database: &str) -> Result<String>;

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

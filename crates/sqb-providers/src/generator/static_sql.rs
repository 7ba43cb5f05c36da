//! Static SQL generator for testing and development
//!
//! Returns a canned statement regardless of the prompt. Output still goes
//! through the shared fence-stripping path, so tests exercise the same
//! normalization the real generators use.

use async_trait::async_trait;

use sqb_domain::error::Result;
use sqb_domain::ports::providers::SqlGenerator;

use crate::generator::{compose_prompt, strip_sql_fences};

/// Static SQL generator
pub struct StaticSqlGenerator {
    response: String,
    dialect: String,
}

impl StaticSqlGenerator {
    /// Create a generator that always answers with `response`.
    pub fn returning(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            dialect: "PostgreSQL".to_string(),
        }
    }

    /// Set the SQL dialect named in built prompts.
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }
}

#[async_trait]
impl SqlGenerator for StaticSqlGenerator {
    fn build_prompt(&self, schema_context: &str, user_query: &str) -> String {
        compose_prompt(schema_context, user_query, &self.dialect)
    }

    async fn generate_sql(&self, _prompt: &str) -> Result<String> {
        Ok(strip_sql_fences(&self.response))
    }

    fn provider_name(&self) -> &str {
        "static"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use sqb_application::ports::registry::{SQL_GENERATORS, SqlGeneratorConfig, SqlGeneratorEntry};

#[linkme::distributed_slice(SQL_GENERATORS)]
static STATIC_GENERATOR: SqlGeneratorEntry = SqlGeneratorEntry {
    name: "static",
    description: "Static generator for testing (canned response from config extra.sql)",
    factory: |config: &SqlGeneratorConfig| {
        let response = config
            .extra
            .get("sql")
            .cloned()
            .unwrap_or_else(|| "SELECT 1".to_string());
        let mut generator = StaticSqlGenerator::returning(response);
        if let Some(dialect) = config.dialect.clone() {
            generator = generator.with_dialect(dialect);
        }
        Ok(std::sync::Arc::new(generator))
    },
};

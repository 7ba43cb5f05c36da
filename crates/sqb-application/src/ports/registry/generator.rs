//! SQL Generator Registry
//!
//! linkme registry for SQL generator providers, mirroring the embedding
//! registry. Entries are resolved by the provider name from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use sqb_domain::ports::providers::SqlGenerator;

/// Configuration for SQL generator creation
#[derive(Debug, Clone, Default)]
pub struct SqlGeneratorConfig {
    /// Provider name (e.g., "gemini", "static")
    pub provider: String,
    /// Model name/identifier
    pub model: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL for the provider API
    pub base_url: Option<String>,
    /// SQL dialect named in the prompt (e.g., "PostgreSQL")
    pub dialect: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl SqlGeneratorConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the SQL dialect
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }
}

/// Registry entry for SQL generator providers
pub struct SqlGeneratorEntry {
    /// Unique provider name (e.g., "gemini", "static")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create generator instances
    pub factory: fn(&SqlGeneratorConfig) -> Result<Arc<dyn SqlGenerator>, String>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static SQL_GENERATORS: [SqlGeneratorEntry] = [..];

/// Resolve a SQL generator by name from the registry.
pub fn resolve_sql_generator(
    config: &SqlGeneratorConfig,
) -> Result<Arc<dyn SqlGenerator>, String> {
    for entry in SQL_GENERATORS {
        if entry.name == config.provider {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = SQL_GENERATORS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown SQL generator '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered SQL generators as (name, description) pairs.
pub fn list_sql_generators() -> Vec<(&'static str, &'static str)> {
    SQL_GENERATORS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

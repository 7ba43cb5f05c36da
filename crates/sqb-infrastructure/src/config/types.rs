//! Configuration types
//!
//! Serde-backed configuration structs with defaults for every field, so a
//! missing file or section still produces a runnable configuration.

use serde::{Deserialize, Serialize};
use sqb_application::use_cases::UpsertPolicy;
use sqb_domain::error::{Error, Result};

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Source database connection settings
    pub database: DatabaseConfig,
    /// Embedding provider settings
    pub embedding: EmbeddingConfig,
    /// Similarity index settings
    pub index: IndexConfig,
    /// SQL generator settings
    pub generator: GeneratorConfig,
    /// Workflow tuning
    pub workflow: WorkflowConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validate cross-field constraints after extraction.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::configuration("server.port must be non-zero"));
        }
        if self.database.pool_size == 0 {
            return Err(Error::configuration("database.pool_size must be at least 1"));
        }
        if self.workflow.top_k == 0 {
            return Err(Error::configuration("workflow.top_k must be at least 1"));
        }
        for (field, value) in [
            ("embedding.provider", &self.embedding.provider),
            ("index.provider", &self.index.provider),
            ("generator.provider", &self.generator.provider),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("{field} must not be empty")));
            }
        }
        crate::logging::parse_log_level(&self.logging.level)?;
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Source database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Login user
    pub user: String,
    /// Login password
    pub password: String,
    /// Maximum pooled connections
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "postgres".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            pool_size: 2,
        }
    }
}

/// Embedding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider name from the embedding registry
    pub provider: String,
    /// Model name override
    pub model: Option<String>,
    /// API key (falls back to the generator key for Gemini)
    pub api_key: Option<String>,
    /// Base URL override for API providers
    pub base_url: Option<String>,
    /// Expected embedding dimensions
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "fastembed".to_string(),
            model: None,
            api_key: None,
            base_url: None,
            dimensions: None,
        }
    }
}

/// Similarity index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Provider name from the similarity index registry
    pub provider: String,
    /// Base URL of a remote index service
    pub base_url: Option<String>,
    /// Collection the schema documents are stored under
    pub collection: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            base_url: None,
            collection: "db_schema".to_string(),
        }
    }
}

/// SQL generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider name from the SQL generator registry
    pub provider: String,
    /// Model name
    pub model: String,
    /// API key
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// SQL dialect named in the prompt
    pub dialect: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-pro".to_string(),
            api_key: None,
            base_url: None,
            dialect: "PostgreSQL".to_string(),
        }
    }
}

/// Workflow tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Nearest neighbors requested from the similarity search
    pub top_k: usize,
    /// When to write the fetched schema into the index
    pub upsert_policy: UpsertPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            top_k: 1,
            upsert_policy: UpsertPolicy::Always,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

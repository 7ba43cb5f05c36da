//! Embedding Provider Registry
//!
//! Auto-registration system for embedding providers using linkme distributed
//! slices. Providers register themselves via `#[linkme::distributed_slice]`
//! and are discovered at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use sqb_domain::ports::providers::EmbeddingProvider;

/// Configuration for embedding provider creation
///
/// Contains all configuration options an embedding provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingProviderConfig {
    /// Provider name (e.g., "fastembed", "gemini", "null")
    pub provider: String,
    /// Model name/identifier
    pub model: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL for the provider API
    pub base_url: Option<String>,
    /// Embedding dimensions (if configurable)
    pub dimensions: Option<usize>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl EmbeddingProviderConfig {
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

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the dimensions
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// Registry entry for embedding providers
pub struct EmbeddingProviderEntry {
    /// Unique provider name (e.g., "fastembed", "gemini", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instances
    pub factory: fn(&EmbeddingProviderConfig) -> Result<Arc<dyn EmbeddingProvider>, String>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static EMBEDDING_PROVIDERS: [EmbeddingProviderEntry] = [..];

/// Resolve an embedding provider by name from the registry.
///
/// # Returns
/// * `Ok(Arc<dyn EmbeddingProvider>)` - Created provider instance
/// * `Err(String)` - Provider not found or factory failed
pub fn resolve_embedding_provider(
    config: &EmbeddingProviderConfig,
) -> Result<Arc<dyn EmbeddingProvider>, String> {
    for entry in EMBEDDING_PROVIDERS {
        if entry.name == config.provider {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = EMBEDDING_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown embedding provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered embedding providers as (name, description) pairs.
pub fn list_embedding_providers() -> Vec<(&'static str, &'static str)> {
    EMBEDDING_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_fields() {
        let config = EmbeddingProviderConfig::new("test")
            .with_model("model-1")
            .with_api_key("secret")
            .with_base_url("http://localhost")
            .with_dimensions(384);

        assert_eq!(config.provider, "test");
        assert_eq!(config.model, Some("model-1".to_string()));
        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.base_url, Some("http://localhost".to_string()));
        assert_eq!(config.dimensions, Some(384));
    }

    #[test]
    fn unknown_provider_reports_available_names() {
        let Err(err) = resolve_embedding_provider(&EmbeddingProviderConfig::new("no-such")) else {
            panic!("resolution must fail");
        };
        assert!(err.contains("no-such"));
        assert!(err.contains("Available providers"));
    }
}

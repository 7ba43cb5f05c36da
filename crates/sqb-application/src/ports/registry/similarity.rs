//! Similarity Index Registry
//!
//! linkme registry for similarity index providers, mirroring the embedding
//! registry. Entries are resolved by the provider name from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use sqb_domain::ports::providers::SimilarityIndex;

/// Configuration for similarity index creation
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndexConfig {
    /// Provider name (e.g., "memory", "chroma")
    pub provider: String,
    /// Base URL of a remote index service
    pub base_url: Option<String>,
    /// Collection name to store schema documents under
    pub collection: Option<String>,
    /// Embedding dimensions stored in the index
    pub dimensions: Option<usize>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl SimilarityIndexConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }
}

/// Registry entry for similarity index providers
pub struct SimilarityIndexEntry {
    /// Unique provider name (e.g., "memory", "chroma")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create index instances
    pub factory: fn(&SimilarityIndexConfig) -> Result<Arc<dyn SimilarityIndex>, String>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static SIMILARITY_INDEXES: [SimilarityIndexEntry] = [..];

/// Resolve a similarity index by name from the registry.
pub fn resolve_similarity_index(
    config: &SimilarityIndexConfig,
) -> Result<Arc<dyn SimilarityIndex>, String> {
    for entry in SIMILARITY_INDEXES {
        if entry.name == config.provider {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = SIMILARITY_INDEXES.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown similarity index '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered similarity indexes as (name, description) pairs.
pub fn list_similarity_indexes() -> Vec<(&'static str, &'static str)> {
    SIMILARITY_INDEXES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

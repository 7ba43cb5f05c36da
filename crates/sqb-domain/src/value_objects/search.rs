//! Similarity search value objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value Object: Similarity Match
///
/// A single nearest-neighbor result from the similarity index. The workflow
/// only reads `document` of the top match; the rest is surfaced to the
/// caller for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaMatch {
    /// Document id the match was stored under (the database name)
    pub id: String,
    /// The stored schema text
    pub document: String,
    /// Distance to the query vector (lower is closer)
    pub distance: f64,
    /// Provider-specific metadata attached to the stored document
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SchemaMatch {
    /// Create a match with empty metadata.
    pub fn new(id: impl Into<String>, document: impl Into<String>, distance: f64) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            distance,
            metadata: HashMap::new(),
        }
    }
}

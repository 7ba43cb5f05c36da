//! API request and response models

use serde::{Deserialize, Serialize};

/// Body of `POST /api/query`
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question
    pub question: String,
    /// Database to introspect (also the similarity index key)
    pub database: String,
    /// Run the generated statement; false produces a reviewable dry run
    #[serde(default)]
    pub execute: bool,
}

/// Error body returned for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure message
    pub error: String,
    /// Pipeline stage (or ambient concern) that failed
    pub stage: String,
}

/// One provider entry in the listings
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Registry name
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Body of `GET /api/providers`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersResponse {
    /// Registered embedding providers
    pub embedding: Vec<ProviderInfo>,
    /// Registered similarity indexes
    pub similarity_index: Vec<ProviderInfo>,
    /// Registered SQL generators
    pub sql_generator: Vec<ProviderInfo>,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status
    pub status: String,
    /// Active embedding provider name
    pub embedding_provider: String,
    /// Active similarity index name
    pub similarity_index: String,
    /// Active SQL generator name
    pub sql_generator: String,
}

//! Common helpers for API providers
//!
//! Shared constructor patterns used across the embedding and generation
//! providers to keep initialization uniform.

use std::time::Duration;

/// Common constructor patterns used by API-backed providers
pub mod constructor {
    use std::time::Duration;

    /// Validate and normalize an API key
    pub fn validate_api_key(api_key: &str) -> String {
        api_key.trim().to_string()
    }

    /// Validate and normalize an optional URL
    pub fn validate_url(url: Option<String>) -> Option<String> {
        url.map(|u| u.trim().trim_end_matches('/').to_string())
    }

    /// Default timeout when not specified
    pub fn default_timeout() -> Duration {
        Duration::from_secs(30)
    }

    /// Get effective URL with fallback to default
    pub fn get_effective_url(provided_url: Option<&str>, default_url: &str) -> String {
        provided_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| default_url.to_string())
    }
}

/// Default timeout for provider API requests
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

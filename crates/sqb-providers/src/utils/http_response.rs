//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from API providers.
//! Several provider families (embedding, index, generation) call remote
//! APIs, so the error constructor is passed in rather than fixed.

use reqwest::Response;
use sqb_domain::error::{Error, Result};

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON.
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    /// * `make_error` - Stage error constructor (e.g. `Error::embedding`)
    ///
    /// # Returns
    /// Parsed JSON value on success, or the stage error with status context
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
        make_error: fn(String) -> Error,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 => make_error(format!("{provider_name} authentication failed: {error_text}")),
                429 => make_error(format!("{provider_name} rate limit exceeded: {error_text}")),
                500..=599 => {
                    make_error(format!("{provider_name} server error ({code}): {error_text}"))
                }
                _ => make_error(format!("{provider_name} request failed ({code}): {error_text}")),
            });
        }

        response.json().await.map_err(|e| {
            make_error(format!("{provider_name} response parse failed: {e}"))
        })
    }
}

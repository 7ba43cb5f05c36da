//! Gemini SQL Generator
//!
//! Implements the SqlGenerator port using Google's Gemini generateContent
//! API. Prompt composition is shared with the other generators; the raw
//! model output is fence-stripped before being returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::SqlGenerator;

use crate::constants::{CONTENT_TYPE_JSON, ERROR_MSG_REQUEST_TIMEOUT};
use crate::embedding::helpers::constructor;
use crate::generator::{compose_prompt, strip_sql_fences};
use crate::utils::HttpResponseUtils;

/// Gemini SQL generator
pub struct GeminiSqlGenerator {
    api_key: String,
    base_url: Option<String>,
    model: String,
    dialect: String,
    timeout: Duration,
    http_client: Client,
}

impl GeminiSqlGenerator {
    /// Create a new Gemini SQL generator
    ///
    /// # Arguments
    /// * `api_key` - Google AI API key
    /// * `base_url` - Optional custom base URL (defaults to Google AI API)
    /// * `model` - Model name (e.g., "gemini-1.5-pro")
    /// * `dialect` - SQL dialect named in the prompt (e.g., "PostgreSQL")
    /// * `timeout` - Request timeout duration
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        dialect: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        let api_key = constructor::validate_api_key(&api_key);
        let base_url = constructor::validate_url(base_url);
        Self {
            api_key,
            base_url,
            model,
            dialect,
            timeout,
            http_client,
        }
    }

    /// Get the effective base URL
    fn effective_base_url(&self) -> String {
        constructor::get_effective_url(
            self.base_url.as_deref(),
            "https://generativelanguage.googleapis.com",
        )
    }

    /// Get the model name for API calls (remove prefix if present)
    fn api_model_name(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    /// Get the model name for this provider
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Extract the generated text from a generateContent response.
///
/// The statement lives in `candidates[0].content.parts[*].text`; multi-part
/// responses are concatenated.
fn parse_generated_text(response_data: &serde_json::Value) -> Result<String> {
    let parts = response_data["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array())
        .ok_or_else(|| Error::generation("invalid response format: missing candidates"))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(Error::generation("model returned no text"));
    }

    Ok(text)
}

#[async_trait]
impl SqlGenerator for GeminiSqlGenerator {
    fn build_prompt(&self, schema_context: &str, user_query: &str) -> String {
        compose_prompt(schema_context, user_query, &self.dialect)
    }

    async fn generate_sql(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.effective_base_url(),
            self.api_model_name()
        );

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::generation(format!("{} {:?}", ERROR_MSG_REQUEST_TIMEOUT, self.timeout))
                } else {
                    Error::generation(format!("HTTP request failed: {e}"))
                }
            })?;

        let body = HttpResponseUtils::check_and_parse(response, "Gemini", Error::generation).await?;
        let raw = parse_generated_text(&body)?;
        Ok(strip_sql_fences(&raw))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use sqb_application::ports::registry::{SQL_GENERATORS, SqlGeneratorConfig, SqlGeneratorEntry};

#[linkme::distributed_slice(SQL_GENERATORS)]
static GEMINI_GENERATOR: SqlGeneratorEntry = SqlGeneratorEntry {
    name: "gemini",
    description: "Google Gemini SQL generator (gemini-1.5-pro and compatible)",
    factory: |config: &SqlGeneratorConfig| {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| "Gemini requires api_key".to_string())?;
        let base_url = config.base_url.clone();
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| "gemini-1.5-pro".to_string());
        let dialect = config
            .dialect
            .clone()
            .unwrap_or_else(|| "PostgreSQL".to_string());
        let timeout = crate::embedding::helpers::constructor::default_timeout();
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

        Ok(std::sync::Arc::new(GeminiSqlGenerator::new(
            api_key, base_url, model, dialect, timeout, http_client,
        )))
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generated_text_from_candidates() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```sql\nSELECT 1\n```" }] }
            }]
        });
        let raw = parse_generated_text(&body).unwrap();
        assert_eq!(strip_sql_fences(&raw), "SELECT 1");
    }

    #[test]
    fn concatenates_multiple_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "SELECT id " }, { "text": "FROM orders" }] }
            }]
        });
        assert_eq!(parse_generated_text(&body).unwrap(), "SELECT id FROM orders");
    }

    #[test]
    fn missing_candidates_is_a_generation_error() {
        let body = serde_json::json!({ "candidates": [] });
        let err = parse_generated_text(&body).unwrap_err();
        assert_eq!(err.stage(), "generation");
    }
}

//! Chroma similarity index implementation
//!
//! Remote index backed by a Chroma server's REST API. The collection is
//! created lazily (get-or-create) on first use and its id cached for the
//! lifetime of the provider.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::OnceCell;

use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::SimilarityIndex;
use sqb_domain::value_objects::{Embedding, SchemaMatch};

use crate::constants::CONTENT_TYPE_JSON;
use crate::utils::HttpResponseUtils;

/// Chroma-backed similarity index
pub struct ChromaSimilarityIndex {
    base_url: String,
    collection_name: String,
    timeout: Duration,
    http_client: Client,
    // Resolved lazily via get-or-create; stable for the collection's lifetime
    collection_id: OnceCell<String>,
}

impl ChromaSimilarityIndex {
    /// Create a new Chroma index client.
    ///
    /// # Arguments
    /// * `base_url` - Chroma server URL (e.g., "http://localhost:8000")
    /// * `collection_name` - Collection the schema documents live in
    /// * `timeout` - Per-request timeout
    /// * `http_client` - Reqwest HTTP client
    pub fn new(
        base_url: String,
        collection_name: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            collection_name,
            timeout,
            http_client,
            collection_id: OnceCell::new(),
        }
    }

    /// POST a JSON payload and parse the JSON response.
    async fn post_json(
        &self,
        url: &str,
        payload: &serde_json::Value,
        make_error: fn(String) -> Error,
    ) -> Result<serde_json::Value> {
        let response = self
            .http_client
            .post(url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| make_error(format!("Chroma request failed: {e}")))?;

        HttpResponseUtils::check_and_parse(response, "Chroma", make_error).await
    }

    /// Resolve the collection id, creating the collection if needed.
    async fn collection_id(&self, make_error: fn(String) -> Error) -> Result<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                let url = format!("{}/api/v1/collections", self.base_url);
                let payload = serde_json::json!({
                    "name": self.collection_name,
                    "get_or_create": true,
                });
                let body = self.post_json(&url, &payload, make_error).await?;
                body["id"]
                    .as_str()
                    .map(ToString::to_string)
                    .ok_or_else(|| {
                        make_error("Chroma collection response missing id".to_string())
                    })
            })
            .await?;
        Ok(id)
    }
}

#[async_trait]
impl SimilarityIndex for ChromaSimilarityIndex {
    async fn upsert(&self, id: &str, document: &str, embedding: &Embedding) -> Result<()> {
        let collection = self.collection_id(Error::index_write).await?;
        let url = format!("{}/api/v1/collections/{}/upsert", self.base_url, collection);
        let payload = serde_json::json!({
            "ids": [id],
            "documents": [document],
            "embeddings": [embedding.vector],
        });
        self.post_json(&url, &payload, Error::index_write).await?;
        Ok(())
    }

    async fn search(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<SchemaMatch>> {
        let collection = self.collection_id(Error::index_query).await?;
        let url = format!("{}/api/v1/collections/{}/query", self.base_url, collection);
        let payload = serde_json::json!({
            "query_embeddings": [query_vector],
            "n_results": top_k,
            "include": ["documents", "distances", "metadatas"],
        });
        let body = self.post_json(&url, &payload, Error::index_query).await?;
        parse_query_response(&body)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let collection = self.collection_id(Error::index_write).await?;
        let url = format!("{}/api/v1/collections/{}/delete", self.base_url, collection);
        let payload = serde_json::json!({ "ids": [id] });
        self.post_json(&url, &payload, Error::index_write).await?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "chroma"
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/api/v1/heartbeat", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::index_query(format!("Chroma heartbeat failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::index_query(format!(
                "Chroma heartbeat returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Parse a Chroma query response into matches.
///
/// Chroma nests each field one level per query vector; we always send a
/// single query vector, so the first row of each field is the result.
fn parse_query_response(body: &serde_json::Value) -> Result<Vec<SchemaMatch>> {
    let first_row = |field: &str| -> Vec<serde_json::Value> {
        body[field]
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.as_array())
            .cloned()
            .unwrap_or_default()
    };

    let ids = first_row("ids");
    let documents = first_row("documents");
    let distances = first_row("distances");
    let metadatas = first_row("metadatas");

    let mut matches = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        let id = id
            .as_str()
            .ok_or_else(|| Error::index_query("Chroma returned a non-string id"))?;
        let document = documents
            .get(i)
            .and_then(|d| d.as_str())
            .unwrap_or_default();
        let distance = distances.get(i).and_then(serde_json::Value::as_f64).unwrap_or(0.0);
        let metadata: HashMap<String, serde_json::Value> = metadatas
            .get(i)
            .and_then(|m| m.as_object())
            .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();

        matches.push(SchemaMatch {
            id: id.to_string(),
            document: document.to_string(),
            distance,
            metadata,
        });
    }

    Ok(matches)
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use sqb_application::ports::registry::{
    SIMILARITY_INDEXES, SimilarityIndexConfig, SimilarityIndexEntry,
};

use crate::constants::{DEFAULT_CHROMA_URL, DEFAULT_SCHEMA_COLLECTION};

/// Factory function for creating Chroma index instances.
fn chroma_index_factory(
    config: &SimilarityIndexConfig,
) -> std::result::Result<Arc<dyn SimilarityIndex>, String> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_CHROMA_URL.to_string());
    let collection = config
        .collection
        .clone()
        .unwrap_or_else(|| DEFAULT_SCHEMA_COLLECTION.to_string());
    let timeout = crate::embedding::helpers::constructor::default_timeout();
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    Ok(Arc::new(ChromaSimilarityIndex::new(
        base_url, collection, timeout, http_client,
    )))
}

#[linkme::distributed_slice(SIMILARITY_INDEXES)]
static CHROMA_INDEX: SimilarityIndexEntry = SimilarityIndexEntry {
    name: "chroma",
    description: "Chroma server similarity index (REST API)",
    factory: chroma_index_factory,
};

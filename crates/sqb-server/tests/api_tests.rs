//! HTTP API tests
//!
//! Drives the router in-process with tower's oneshot against an offline
//! provider stack (null embedding, in-memory index, static generator).

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sqb_application::use_cases::QueryWorkflow;
use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::{SchemaProvider, SqlExecutor};
use sqb_domain::value_objects::QueryRows;
use sqb_providers::embedding::NullEmbeddingProvider;
use sqb_providers::generator::StaticSqlGenerator;
use sqb_providers::similarity::InMemorySimilarityIndex;
use sqb_server::handlers::AppState;
use sqb_server::models::{ErrorResponse, HealthResponse, ProvidersResponse};
use sqb_server::routes::api_router;

struct FixedSchemaProvider;

#[async_trait]
impl SchemaProvider for FixedSchemaProvider {
    async fn fetch_schema_text(&self, _database: &str) -> Result<String> {
        Ok("Table: Orders | Columns: id, amount\n".to_string())
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

struct StubExecutor {
    fail: bool,
}

#[async_trait]
impl SqlExecutor for StubExecutor {
    async fn execute(&self, _sql: &str) -> Result<QueryRows> {
        if self.fail {
            return Err(Error::sql_execution("syntax error at or near \"FORM\""));
        }
        Ok(QueryRows {
            columns: vec!["id".to_string()],
            rows: vec![vec![serde_json::json!(1)]],
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

fn test_router(failing_executor: bool) -> Router {
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(InMemorySimilarityIndex::new()),
        Arc::new(StaticSqlGenerator::returning("SELECT id FROM Orders")),
        Arc::new(StubExecutor {
            fail: failing_executor,
        }),
    );
    api_router(AppState {
        workflow: Arc::new(workflow),
    })
}

fn query_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn dry_run_returns_sql_without_results() {
    let response = test_router(false)
        .oneshot(query_request(serde_json::json!({
            "question": "list order ids",
            "database": "sales",
            "execute": false,
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["sql_query"], "SELECT id FROM Orders");
    assert!(body["query_result"].is_null());
}

#[tokio::test]
async fn execute_attaches_rows() {
    let response = test_router(false)
        .oneshot(query_request(serde_json::json!({
            "question": "list order ids",
            "database": "sales",
            "execute": true,
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["query_result"]["columns"][0], "id");
    assert_eq!(body["query_result"]["rows"][0][0], 1);
}

#[tokio::test]
async fn blank_question_is_rejected() {
    let response = test_router(false)
        .oneshot(query_request(serde_json::json!({
            "question": "   ",
            "database": "sales",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.stage, "invalid_argument");
}

#[tokio::test]
async fn executor_failure_maps_to_unprocessable_with_stage() {
    let response = test_router(true)
        .oneshot(query_request(serde_json::json!({
            "question": "list order ids",
            "database": "sales",
            "execute": true,
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.stage, "sql_execution");
    // The engine message survives the HTTP mapping
    assert!(body.error.contains("syntax error at or near \"FORM\""));
}

#[tokio::test]
async fn providers_endpoint_lists_linked_implementations() {
    let response = test_router(false)
        .oneshot(
            Request::builder()
                .uri("/api/providers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ProvidersResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.embedding.iter().any(|p| p.name == "null"));
    assert!(body.similarity_index.iter().any(|p| p.name == "memory"));
    assert!(body.sql_generator.iter().any(|p| p.name == "static"));
}

#[tokio::test]
async fn health_reports_active_providers() {
    let response = test_router(false)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: HealthResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.embedding_provider, "null");
    assert_eq!(body.similarity_index, "memory");
    assert_eq!(body.sql_generator, "static");
}

#[tokio::test]
async fn index_page_is_served() {
    let response = test_router(false)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("SQL Query Bridge"));
}

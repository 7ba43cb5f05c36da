//! API request handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use sqb_application::ports::registry::{
    list_embedding_providers, list_similarity_indexes, list_sql_generators,
};
use sqb_application::use_cases::QueryWorkflow;
use sqb_domain::error::Error;

use crate::models::{
    ErrorResponse, HealthResponse, ProviderInfo, ProvidersResponse, QueryRequest,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// The one workflow instance, built at startup
    pub workflow: Arc<QueryWorkflow>,
}

/// `POST /api/query` - run the workflow, optionally executing the result.
///
/// The non-empty preconditions on question and database are enforced here,
/// at the presentation boundary, not inside the workflow.
pub async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    if request.question.trim().is_empty() || request.database.trim().is_empty() {
        return error_response(&Error::invalid_argument(
            "question and database must be non-empty",
        ));
    }

    match state
        .workflow
        .run(&request.question, &request.database, request.execute)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            error!(stage = err.stage(), error = %err, "query workflow failed");
            error_response(&err)
        }
    }
}

/// `GET /api/providers` - list the registered provider implementations.
pub async fn list_providers() -> impl IntoResponse {
    Json(ProvidersResponse {
        embedding: to_infos(list_embedding_providers()),
        similarity_index: to_infos(list_similarity_indexes()),
        sql_generator: to_infos(list_sql_generators()),
    })
}

/// `GET /health` - liveness plus the active provider names.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let workflow = &state.workflow;
    Json(HealthResponse {
        status: "healthy".to_string(),
        embedding_provider: workflow.embedding_provider().provider_name().to_string(),
        similarity_index: workflow.similarity_index().provider_name().to_string(),
        sql_generator: workflow.sql_generator().provider_name().to_string(),
    })
}

/// Map a workflow error to a status code, keeping the stage name in the body.
///
/// Schema retrieval and SQL execution failures are user-diagnosable (wrong
/// database name, invalid generated SQL), so they come back as 422 rather
/// than 500.
fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        Error::SchemaRetrieval { .. } | Error::SqlExecution { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            stage: err.stage().to_string(),
        }),
    )
        .into_response()
}

fn to_infos(entries: Vec<(&'static str, &'static str)>) -> Vec<ProviderInfo> {
    entries
        .into_iter()
        .map(|(name, description)| ProviderInfo {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

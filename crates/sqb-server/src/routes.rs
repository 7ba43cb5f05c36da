//! API routes
//!
//! Route definitions for the HTTP API.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{AppState, health, list_providers, run_query};
use crate::ui::index_page;

/// Create the API router
///
/// Routes:
/// - GET / - embedded browser page
/// - GET /health - liveness and active provider names
/// - GET /api/providers - registered provider implementations
/// - POST /api/query - run the natural-language-to-SQL workflow
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/providers", get(list_providers))
        .route("/api/query", post(run_query))
        .with_state(state)
}

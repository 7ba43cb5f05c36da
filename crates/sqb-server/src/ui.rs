//! Embedded browser page
//!
//! A single static page driving the JSON API: generate first, review the
//! statement, then execute. Embedding the asset keeps the binary
//! self-contained with no static-file serving to configure.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// `GET /` - serve the browser page.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

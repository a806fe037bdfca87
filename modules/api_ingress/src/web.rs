use axum::response::{Html, Json};
use serde_json::{json, Value};
use utoipa::OpenApi;

/// Plaintext greeting on the root path.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn home() -> &'static str {
    tracing::info!("Serving homepage greeting");
    "HELLO FROM HOMEPAGE"
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service health with a RFC3339 timestamp")
    )
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Machine-readable description of the HTTP surface.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Human documentation page rendering `/openapi.json` via Stoplight Elements.
pub async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Userbox API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

//! Integration tests for the assembled application router: middleware,
//! service endpoints, and the documentation surface.

use std::sync::Arc;

use api_ingress::{ApiIngress, ApiIngressConfig};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use users::{domain::service::Service, infra::memory::InMemoryUsersRepository};

fn build_router_with(config: ApiIngressConfig) -> Router {
    let service = Arc::new(Service::new(Arc::new(InMemoryUsersRepository::seeded())));
    ApiIngress::new(config).build_router(service)
}

fn build_router() -> Router {
    build_router_with(ApiIngressConfig::default())
}

async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn homepage_serves_the_greeting() {
    let res = build_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res.into_body()).await, "HELLO FROM HOMEPAGE");
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_str(&body_string(res.into_body()).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn responses_carry_a_generated_request_id() {
    let res = build_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let rid = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(!rid.is_empty(), "a request id must be generated");
}

#[tokio::test]
async fn client_request_id_is_propagated() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "test-rid-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        res.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("test-rid-123")
    );
}

#[tokio::test]
async fn openapi_document_describes_the_user_surface() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_str(&body_string(res.into_body()).await).unwrap();
    assert_eq!(doc["info"]["title"], "Userbox API");
    assert!(doc["paths"]["/users"]["get"].is_object());
    assert!(doc["paths"]["/users"]["post"].is_object());
    assert!(doc["paths"]["/users/{id}"]["patch"].is_object());
    assert!(doc["components"]["schemas"]["UserDto"].is_object());
}

#[tokio::test]
async fn docs_page_references_the_openapi_document() {
    let res = build_router()
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res.into_body()).await;
    assert!(html.contains("elements-api"));
    assert!(html.contains("/openapi.json"));
}

#[tokio::test]
async fn docs_can_be_disabled() {
    let router = build_router_with(ApiIngressConfig {
        enable_docs: false,
        ..Default::default()
    });

    let res = router
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_routes_are_mounted() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value =
        serde_json::from_str(&body_string(res.into_body()).await).unwrap();
    assert_eq!(listed.as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn syntactically_invalid_id_is_rejected_by_the_extractor() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/users/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn well_formed_unknown_id_gets_the_not_found_body_at_200() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri(format!("/users/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res.into_body()).await, "User data not found.");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let res = build_router()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

//! HTTP entry point for the Userbox server.
//!
//! Owns router assembly (middleware stack, documentation endpoints) and the
//! listening socket with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::Request;
use axum::{body::Body, middleware::from_fn, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;

pub mod config;
pub mod openapi;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;

use users::domain::service::Service;

/// The HTTP ingress: builds the application router and serves it.
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    /// Assemble the full application router.
    ///
    /// Request path through the middleware stack:
    /// BodyLimit → CORS → Timeout → SetRequestId → Trace → PropagateRequestId
    /// → extensions push → routes. SetRequestId runs before the trace span is
    /// created so the span always carries a real id.
    pub fn build_router(&self, service: Arc<Service>) -> Router {
        let mut router = Router::new()
            .route("/", get(web::home))
            .route("/health", get(web::health_check))
            .merge(users::api::rest::routes::router(service));

        if self.config.enable_docs {
            router = router
                .route("/openapi.json", get(web::openapi_json))
                .route("/docs", get(web::serve_docs));
        }

        let x_request_id = request_id::header();

        // Innermost: request id into extensions and the request span
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        // Copy the request's x-request-id onto the response
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

        // One span per request; status and latency recorded on completion
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let rid = req
                        .headers()
                        .get(request_id::header())
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<Body>, latency: Duration, span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                    },
                ),
        );

        // Generate x-request-id when the client didn't send one
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        // Bound slow handlers
        router = router.layer(TimeoutLayer::new(Duration::from_secs(30)));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        // Bound request body memory
        router.layer(RequestBodyLimitLayer::new(16 * 1024 * 1024))
    }

    /// Bind the listening socket and serve until a termination signal.
    pub async fn serve(&self, addr: SocketAddr, router: Router) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("Server running on http://{addr}");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if let Err(e) = wait_for_shutdown().await {
                    tracing::warn!("Shutdown signal listener failed: {e}");
                }
            })
            .await
            .context("HTTP server terminated abnormally")
    }
}

/// Resolve when the process receives a termination signal.
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

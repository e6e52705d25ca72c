//! Serverless entry point.
//!
//! Hosting platforms that invoke one function per request call [`invoke`]
//! instead of running a listener. The router is built once per process from
//! the environment configuration and reused for every invocation.

use std::convert::Infallible;

use axum::{body::Body, extract::Request, response::Response, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use once_cell::sync::Lazy;
use tower::ServiceExt;
use tracing::warn;

use super::handlers::AppState;
use super::routes::{create_router, with_layers};
use crate::config::{Config, Variant};
use crate::metrics::install_exporter;

static ROUTER: Lazy<Router> = Lazy::new(|| {
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {}", e);
        Config::default()
    });

    let metrics = if config.enable_metrics {
        install_exporter()
            .map_err(|e| warn!("Metrics disabled: {}", e))
            .ok()
    } else {
        None
    };

    serverless_router(&config, metrics)
});

/// Build the serverless router. `API_VARIANT` is ignored; CORS follows
/// `cors_permissive` and `/metrics` is routed when a handle is given.
pub fn serverless_router(config: &Config, metrics: Option<PrometheusHandle>) -> Router {
    let mut state = AppState::new(Variant::Serverless);
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }
    with_layers(create_router(state), config.cors_permissive)
}

/// Dispatch a single request through the serverless route table.
pub async fn invoke(request: Request<Body>) -> Response {
    let result: Result<Response, Infallible> = ROUTER.clone().oneshot(request).await;
    match result {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let request = axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = invoke(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn invoke_serves_serverless_root() {
        let (status, bytes) = call("/").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["endpoints"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn repeated_invocations_reuse_the_router() {
        for _ in 0..3 {
            let (status, _) = call("/health").await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn invoke_returns_not_found_for_unrouted_predict() {
        let (status, bytes) = call("/predict/PETR4.SA").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(bytes.is_empty());
    }

    async fn send(router: Router, uri: &str) -> Response {
        let request = axum::http::Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn serverless_router_honours_cors_setting() {
        let enabled = Config::default();
        let disabled = Config {
            cors_permissive: false,
            ..Config::default()
        };

        let response = send(serverless_router(&enabled, None), "/health").await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let response = send(serverless_router(&disabled, None), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn serverless_router_ignores_configured_variant() {
        let config = Config {
            api_variant: Variant::Server,
            ..Config::default()
        };

        let response = send(serverless_router(&config, None), "/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = send(serverless_router(&config, None), "/api").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serverless_router_exposes_metrics_only_with_handle() {
        let config = Config::default();
        let handle = PrometheusBuilder::new().build_recorder().handle();

        let response = send(serverless_router(&config, Some(handle)), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(serverless_router(&config, None), "/metrics").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

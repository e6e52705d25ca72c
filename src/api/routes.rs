//! HTTP API route definitions.

use std::time::Duration;

use axum::{body::Body, http::Request, middleware, response::Response, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

use super::handlers::{
    api_health, api_index, dashboard, deploy_health, metrics, openapi_json, root,
    serverless_root, AppState,
};
use crate::config::Variant;
use crate::metrics::track_requests;

/// Method and path of every route a variant serves, `/metrics` excluded.
pub fn route_table(variant: Variant) -> &'static [(&'static str, &'static str)] {
    match variant {
        Variant::Server => &[
            ("GET", "/"),
            ("GET", "/api/health"),
            ("GET", "/api"),
            ("GET", "/openapi.json"),
        ],
        Variant::Serverless => &[
            ("GET", "/"),
            ("GET", "/health"),
            ("GET", "/dashboard"),
            ("GET", "/openapi.json"),
        ],
    }
}

/// Create the API router for the variant in `state`.
///
/// Unknown paths fall through to axum's empty 404.
pub fn create_router(state: AppState) -> Router {
    let router = match state.variant {
        Variant::Server => Router::new()
            .route("/", get(root))
            .route("/api/health", get(api_health))
            .route("/api", get(api_index)),
        Variant::Serverless => Router::new()
            .route("/", get(serverless_root))
            .route("/health", get(deploy_health))
            .route("/dashboard", get(dashboard)),
    };

    let router = router.route("/openapi.json", get(openapi_json));

    let router = if state.metrics.is_some() {
        router.route("/metrics", get(metrics))
    } else {
        router
    };

    router
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Wrap a router with request tracing and, optionally, permissive CORS.
pub fn with_layers(router: Router, cors_permissive: bool) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let router = if cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    };

    router.layer(trace_layer)
}

//! HTTP API handlers.
//!
//! Every handler answers with literal constants. The only values read at
//! request time are the wall clock (`timestamp`) and process uptime.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use super::openapi;
use crate::clock;
use crate::config::Variant;
use crate::error::Result;

/// Welcome message on the server variant root.
pub const SERVER_WELCOME: &str = "🚀 Finanças Enterprise API v1.0 - Online!";
/// Welcome message on the serverless variant root.
pub const SERVERLESS_WELCOME: &str = "🚀 Finanças Enterprise API - FUNCIONANDO!";
/// Endpoints advertised by `GET /api`.
pub const API_ENDPOINTS: [&str; 3] = ["/api/health", "/api/usuarios", "/api/financeiro"];
/// Endpoints advertised by the serverless root.
///
/// `/predict/{ticker}` is advertised only; no route serves it.
pub const SERVERLESS_ENDPOINTS: [&str; 3] = ["/health", "/predict/{ticker}", "/dashboard"];
/// API version reported by `GET /api`.
pub const API_VERSION: &str = "1.0";
/// Deployment target reported in payloads.
pub const DEPLOY_TARGET: &str = "Vercel";

/// Application state shared with handlers.
///
/// Immutable after startup.
#[derive(Clone, Default)]
pub struct AppState {
    /// Route table being served.
    pub variant: Variant,
    /// Prometheus render handle, present when the exporter is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state for a variant, without metrics.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// `GET /` on the server variant.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Welcome message.
    #[schema(value_type = String, example = "🚀 Finanças Enterprise API v1.0 - Online!")]
    pub message: &'static str,
    /// Always "success".
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    /// Request time, UTC, millisecond precision.
    #[schema(format = DateTime, example = "2024-03-05T14:07:09.123Z")]
    pub timestamp: String,
}

/// `GET /api/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiHealthResponse {
    /// Always "OK".
    #[schema(value_type = String, example = "OK")]
    pub status: &'static str,
    /// Seconds since process start.
    #[schema(minimum = 0.0, example = 12.5)]
    pub uptime: f64,
}

/// `GET /api`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiIndexResponse {
    /// Advertised endpoint paths.
    #[schema(value_type = Vec<String>)]
    pub endpoints: [&'static str; 3],
    /// API version.
    #[schema(value_type = String, example = "1.0")]
    pub version: &'static str,
    /// Deployment target.
    #[schema(value_type = String, example = "Vercel")]
    pub deploy: &'static str,
}

/// `GET /` on the serverless variant.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerlessRootResponse {
    /// Welcome message.
    #[schema(value_type = String, example = "🚀 Finanças Enterprise API - FUNCIONANDO!")]
    pub message: &'static str,
    /// Always "success".
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    /// Advertised endpoint paths.
    #[schema(value_type = Vec<String>)]
    pub endpoints: [&'static str; 3],
}

/// `GET /health` on the serverless variant.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeployHealthResponse {
    /// Always "OK".
    #[schema(value_type = String, example = "OK")]
    pub status: &'static str,
    /// Deployment target.
    #[schema(value_type = String, example = "Vercel")]
    pub deploy: &'static str,
}

/// Welcome message with the request timestamp.
#[utoipa::path(
    get,
    path = "/",
    tag = "server",
    responses((status = 200, description = "Service is online", body = RootResponse))
)]
pub async fn root() -> Result<Json<RootResponse>> {
    Ok(Json(RootResponse {
        message: SERVER_WELCOME,
        status: "success",
        timestamp: clock::now_iso8601()?,
    }))
}

/// Health check with process uptime - always returns 200.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "server",
    responses((status = 200, description = "Service is healthy", body = ApiHealthResponse))
)]
pub async fn api_health() -> Json<ApiHealthResponse> {
    Json(ApiHealthResponse {
        status: "OK",
        uptime: clock::uptime_secs(),
    })
}

/// Endpoint listing.
#[utoipa::path(
    get,
    path = "/api",
    tag = "server",
    responses((status = 200, description = "Advertised endpoints", body = ApiIndexResponse))
)]
pub async fn api_index() -> Json<ApiIndexResponse> {
    Json(ApiIndexResponse {
        endpoints: API_ENDPOINTS,
        version: API_VERSION,
        deploy: DEPLOY_TARGET,
    })
}

/// Welcome message with advertised endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "serverless",
    responses((status = 200, description = "Service is online", body = ServerlessRootResponse))
)]
pub async fn serverless_root() -> Json<ServerlessRootResponse> {
    Json(ServerlessRootResponse {
        message: SERVERLESS_WELCOME,
        status: "success",
        endpoints: SERVERLESS_ENDPOINTS,
    })
}

/// Deployment health check - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "serverless",
    responses((status = 200, description = "Service is healthy", body = DeployHealthResponse))
)]
pub async fn deploy_health() -> Json<DeployHealthResponse> {
    Json(DeployHealthResponse {
        status: "OK",
        deploy: DEPLOY_TARGET,
    })
}

/// Static dashboard page.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "serverless",
    responses((status = 200, description = "Dashboard page", content_type = "text/html", body = String))
)]
pub async fn dashboard() -> Html<&'static str> {
    Html(super::dashboard::PAGE)
}

/// OpenAPI document for the variant being served.
pub async fn openapi_json(State(state): State<AppState>) -> impl IntoResponse {
    Json(openapi::document(state.variant))
}

/// Prometheus exposition. Only routed when a handle is present.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn app_state_defaults_to_server_without_metrics() {
        let state = AppState::default();
        assert_eq!(state.variant, Variant::Server);
        assert!(state.metrics.is_none());

        let state = AppState::new(Variant::Serverless);
        assert_eq!(state.variant, Variant::Serverless);
    }

    #[tokio::test]
    async fn api_index_serializes_literal_payload() {
        let Json(body) = api_index().await;
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "endpoints": ["/api/health", "/api/usuarios", "/api/financeiro"],
                "version": "1.0",
                "deploy": "Vercel"
            })
        );
    }

    #[tokio::test]
    async fn serverless_root_advertises_dashboard_and_predict() {
        let Json(body) = serverless_root().await;
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "message": SERVERLESS_WELCOME,
                "status": "success",
                "endpoints": ["/health", "/predict/{ticker}", "/dashboard"]
            })
        );
    }

    #[tokio::test]
    async fn root_carries_timestamp() {
        let Json(body) = root().await.unwrap();
        assert_eq!(body.message, SERVER_WELCOME);
        assert_eq!(body.status, "success");
        assert!(body.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn metrics_without_handle_is_not_found() {
        let response = metrics(State(AppState::default())).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

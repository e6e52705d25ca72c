//! OpenAPI documents, one per route table.

use utoipa::OpenApi;

use super::handlers;
use crate::config::Variant;

/// Server variant document.
#[derive(OpenApi)]
#[openapi(
    info(title = "Finanças Enterprise API", version = "1.0"),
    paths(handlers::root, handlers::api_health, handlers::api_index),
    components(schemas(
        handlers::RootResponse,
        handlers::ApiHealthResponse,
        handlers::ApiIndexResponse
    )),
    tags((name = "server", description = "Persistent server routes"))
)]
pub struct ServerApiDoc;

/// Serverless variant document.
#[derive(OpenApi)]
#[openapi(
    info(title = "Finanças Enterprise API", version = "1.0"),
    paths(
        handlers::serverless_root,
        handlers::deploy_health,
        handlers::dashboard
    ),
    components(schemas(
        handlers::ServerlessRootResponse,
        handlers::DeployHealthResponse
    )),
    tags((name = "serverless", description = "Serverless entry routes"))
)]
pub struct ServerlessApiDoc;

/// Build the document describing a variant's routes.
pub fn document(variant: Variant) -> utoipa::openapi::OpenApi {
    match variant {
        Variant::Server => ServerApiDoc::openapi(),
        Variant::Serverless => ServerlessApiDoc::openapi(),
    }
}

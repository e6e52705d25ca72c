//! HTTP API module: handlers, route tables and the serverless entry.

pub mod dashboard;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod serverless;

pub use handlers::AppState;
pub use routes::{create_router, route_table, with_layers};
pub use serverless::{invoke, serverless_router};

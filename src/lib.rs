//! Finanças Enterprise API.
//!
//! A small HTTP service that answers a fixed set of routes with literal JSON
//! payloads: a welcome message, a health check reporting process uptime, and
//! a list of endpoint names.
//!
//! Two route tables exist:
//!
//! ```text
//! server      GET /             {message, status, timestamp}
//!             GET /api/health   {status: "OK", uptime}
//!             GET /api          {endpoints, version, deploy}
//!
//! serverless  GET /             {message, status, endpoints}
//!             GET /health       {status: "OK", deploy}
//!             GET /dashboard    static HTML
//! ```
//!
//! # Modules
//!
//! - [`api`]: Route handlers, router construction and the serverless entry
//! - [`clock`]: Process uptime and request timestamps
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::{Config, Variant};
pub use error::{ApiError, Result};

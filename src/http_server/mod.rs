//! # delayline HTTP Server Module
//!
//! This module provides the HTTP API over the incident dataset and the
//! user record set. It combines all endpoint routers into a unified Axum
//! server.
//!
//! # Endpoints
//!
//! - `/` - Greeting; `/echo` - request echo to the console
//! - `/date`, `/reason`, `/boro` - exact-match counts
//! - `/records`, `/breakdowns`, `/breakdowns/:id` - record selections
//! - `/users/*` - user registration, listing, bulk delete, stats
//! - `/health`, `/metrics` - health check and service counters

pub mod config;
pub mod errors;
pub mod incident_routes;
pub mod observability_routes;
pub mod server;
pub mod user_routes;

pub use config::HttpConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;

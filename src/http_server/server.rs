//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.
//!
//! This is the unified entry point for the delayline query API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::Logger;
use crate::query::QueryEngine;

use super::config::HttpConfig;
use super::incident_routes::{incident_routes, IncidentState};
use super::observability_routes::observability_routes;
use super::user_routes::{user_routes, UserState};

/// HTTP server for the delayline query API
pub struct HttpServer {
    config: HttpConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given engine
    pub fn new(config: HttpConfig, engine: QueryEngine) -> Self {
        let router = Self::build_router(&config, engine);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpConfig, engine: QueryEngine) -> Router {
        // One registry for everything: the provider already counts its
        // loads there, the route groups add theirs.
        let metrics = engine.provider().metrics();

        // Create shared states for each module
        let incident_state = Arc::new(IncidentState::new(engine, Arc::clone(&metrics)));
        let user_state = Arc::new(UserState::new(Arc::clone(&metrics)));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // Use configured origins for production
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // Combine all routes
        Router::new()
            // Incident queries at root level
            .merge(incident_routes(incident_state))
            // User record set under /users
            .merge(user_routes(user_state))
            // Health check and metrics
            .merge(observability_routes(metrics))
            // Apply CORS middleware
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen address: {}", err),
            )
        })?;

        let addr_text = addr.to_string();
        Logger::info("SERVER_STARTED", &[("addr", &addr_text)]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all endpoint handlers
//! - Wire up middleware (CORS, tracing, timeout, request ID, body limit)
//! - Hold the shared application state (upstream client, upload store)
//! - Serve with graceful shutdown
//!
//! Requests are stateless: the only state shared across them is the
//! immutable configuration, the upstream client's connection pool, and
//! the upload directory path.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::ingest::UploadStore;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub uploads: Arc<UploadStore>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        Self::with_upstream(config, upstream)
    }

    /// Create a server with a pre-built upstream client.
    ///
    /// Tests use this to point the gateway at a local mock upstream.
    pub fn with_upstream(config: GatewayConfig, upstream: UpstreamClient) -> Result<Self> {
        let uploads = Arc::new(UploadStore::new(config.uploads.dir.clone())?);
        let state = AppState { upstream, uploads };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every response, success or failure, carries the permissive CORS
    /// headers the browser clients rely on.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::PUT,
                Method::POST,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        Router::new()
            .route("/create_link_token", post(handlers::create_link_token))
            .route("/exchange_token", post(handlers::exchange_token))
            .route("/get_transactions", get(handlers::get_transactions))
            .route("/api/upload", post(handlers::upload_file))
            .route("/health", get(handlers::health))
            .route("/api/health", get(handlers::health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

//! Budget Gateway
//!
//! A small backend for a personal budgeting application, built with
//! Tokio and Axum. It fronts a third-party financial-data aggregation
//! API and ingests uploaded spreadsheet/CSV files.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                BUDGET GATEWAY                 │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐     ┌──────────────────────┐    │
//!   ───────────────────┼─▶│  http   │────▶│ upstream client +    │────┼──▶ Aggregation
//!                      │  │ server  │     │ normalizer           │    │    API
//!                      │  └────┬────┘     └──────────────────────┘    │
//!                      │       │                                      │
//!                      │       │          ┌──────────────────────┐    │
//!                      │       └─────────▶│ ingest (format       │    │
//!                      │                  │ dispatch + parsers +  │    │
//!   Client Response    │                  │ upload store)         │    │
//!   ◀──────────────────┼──────────────────┴──────────────────────┘    │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │        Cross-Cutting Concerns            │  │
//!                      │  │  config (env + TOML)   error mapping     │  │
//!                      │  │  tracing               CORS / timeouts   │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budget_gateway::config;
use budget_gateway::http::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budget_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("budget-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration (TOML file if named, then environment overrides)
    let config = config::load()?;

    tracing::info!(
        port = config.server.port,
        upstream_environment = %config.upstream.environment,
        upload_dir = %config.uploads.dir.display(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(("0.0.0.0", config.server.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = GatewayServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

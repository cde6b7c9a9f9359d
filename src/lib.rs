//! Budget Gateway Library

pub mod config;
pub mod error;
pub mod http;
pub mod ingest;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use http::GatewayServer;

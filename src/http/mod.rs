//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! client request
//!     → server.rs (Axum setup, CORS, timeout, request ID, trace)
//!     → handlers.rs (endpoint logic: upstream or ingest dispatch)
//!     → success JSON, or GatewayError → {"error"} JSON at the boundary
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, GatewayServer};

//! Upstream aggregation-API subsystem.
//!
//! # Data Flow
//! ```text
//! handler builds operation params
//!     → client.rs (merge credentials, POST JSON, map failures)
//!     → raw serde_json::Value response
//!     → normalize.rs (stable Transaction shape, defaulted fields)
//!     → back to the HTTP surface
//! ```
//!
//! # Design Decisions
//! - One `call` entry point: operation kind + params, no per-operation
//!   request structs, because the upstream schema drifts
//! - Credentials travel in the JSON body (upstream requirement), never
//!   in headers and never in log output
//! - No retries: failures surface synchronously to an interactive caller

pub mod client;
pub mod normalize;
pub mod types;

pub use client::{OperationKind, UpstreamClient};
pub use normalize::normalize_transactions;
pub use types::{Transaction, UpstreamError};

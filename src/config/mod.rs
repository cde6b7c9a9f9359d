//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (named by GATEWAY_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment-variable overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed explicitly to the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; it is never re-read per request
//! - All fields have defaults so the process runs with zero configuration
//!   (defaults are suitable for non-production testing only)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::Credentials;
pub use schema::GatewayConfig;
pub use schema::ServerConfig;
pub use schema::UploadConfig;
pub use schema::UpstreamConfig;

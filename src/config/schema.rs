//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from a
//! config file; individual fields can be overridden from environment
//! variables (see loader.rs).

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Upstream aggregation API settings.
    pub upstream: UpstreamConfig,

    /// Upload persistence settings.
    pub uploads: UploadConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port (env: PORT).
    pub port: u16,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes; bounds upload size.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            request_timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Upstream aggregation API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Environment tier: "sandbox", "development", or "production"
    /// (env: PLAID_ENV). Selects the upstream base host.
    pub environment: String,

    /// API credentials merged into every outbound request body.
    pub credentials: Credentials,

    /// Outbound call timeout in seconds. Upstream failures surface
    /// synchronously to the caller; there is no retry.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            credentials: Credentials::default(),
            timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    /// Base URL for the configured environment tier.
    pub fn base_url(&self) -> String {
        format!("https://{}.plaid.com", self.environment)
    }
}

/// API credentials: opaque identifier + secret pair.
///
/// Immutable after load. The secret never appears in logs or responses;
/// the Debug impl below redacts it.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Client identifier (env: PLAID_CLIENT_ID).
    pub client_id: String,

    /// Client secret (env: PLAID_SECRET).
    pub secret: String,
}

impl Default for Credentials {
    fn default() -> Self {
        // Placeholders for non-production testing; real deployments set
        // PLAID_CLIENT_ID / PLAID_SECRET.
        Self {
            client_id: "test-client-id".to_string(),
            secret: "test-secret".to_string(),
        }
    }
}

impl Credentials {
    /// Whether these are the built-in placeholder credentials.
    pub fn is_placeholder(&self) -> bool {
        let defaults = Credentials::default();
        self.client_id == defaults.client_id && self.secret == defaults.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Upload persistence configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory where original uploads are retained, one file per
    /// uploaded filename (env: UPLOAD_DIR). Created at startup.
    pub dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
        }
    }
}

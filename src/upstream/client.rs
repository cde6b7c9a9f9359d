//! Upstream API client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue outbound JSON calls to the aggregation API
//! - Merge process-wide credentials into each request body
//! - Map transport failures and undecodable bodies into UpstreamError
//! - No retries: a failed call returns immediately
//!
//! # Design Decisions
//! A non-2xx status with a decodable JSON body is NOT an error at this
//! layer. The upstream reports rejections (bad credentials, invalid
//! tokens) as structured JSON on 4xx responses, and the handlers decide
//! what those mean by inspecting the body. Only a dead transport or a
//! body that is not JSON surfaces as UpstreamError.

use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::upstream::types::UpstreamError;

/// Logical operations the gateway performs against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Issue an ephemeral token initializing the account-linking flow.
    CreateLinkSession,
    /// Exchange a one-time public token for a durable access grant.
    ExchangeToken,
    /// List accounts linked under an access grant.
    GetAccounts,
    /// Fetch transactions within a date range.
    GetTransactions,
}

impl OperationKind {
    /// Fixed upstream endpoint path for this operation.
    pub fn path(&self) -> &'static str {
        match self {
            OperationKind::CreateLinkSession => "/link/token/create",
            OperationKind::ExchangeToken => "/item/public_token/exchange",
            OperationKind::GetAccounts => "/accounts/get",
            OperationKind::GetTransactions => "/transactions/get",
        }
    }
}

/// Client for the upstream aggregation API.
///
/// Holds the process-wide credentials loaded at startup; no per-request
/// state. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a client targeting the environment tier named in config.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let base_url = config.base_url();
        Self::with_base_url(config, base_url)
    }

    /// Create a client targeting an explicit base URL.
    ///
    /// Tests use this to point the gateway at a local mock upstream; the
    /// production path derives the URL from the environment tier.
    pub fn with_base_url(config: UpstreamConfig, base_url: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Issue one upstream call.
    ///
    /// Credentials are inserted into the body last, so a caller-supplied
    /// param cannot shadow them. The params map itself is never logged.
    pub async fn call(
        &self,
        op: OperationKind,
        mut params: Map<String, Value>,
    ) -> Result<Value, UpstreamError> {
        params.insert(
            "client_id".to_string(),
            Value::String(self.config.credentials.client_id.clone()),
        );
        params.insert(
            "secret".to_string(),
            Value::String(self.config.credentials.secret.clone()),
        );

        let url = format!("{}{}", self.base_url, op.path());
        tracing::debug!(operation = ?op, path = op.path(), "Calling upstream");

        let response = self
            .http
            .post(&url)
            .json(&Value::Object(params))
            .send()
            .await
            .map_err(|e| UpstreamError {
                status: 0,
                raw_body: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| UpstreamError {
            status: 0,
            raw_body: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(operation = ?op, status = %status, "Upstream returned error status");
        }

        // Decodable bodies are handed to the caller even on a non-2xx
        // status; the handlers inspect them for the fields they need.
        serde_json::from_str(&body).map_err(|_| {
            tracing::warn!(operation = ?op, status = %status, "Upstream returned a non-JSON body");
            UpstreamError {
                status: if status.is_success() {
                    0
                } else {
                    status.as_u16()
                },
                raw_body: body,
            }
        })
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .field("environment", &self.config.environment)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

//! Gateway error taxonomy and HTTP status mapping.
//!
//! # Responsibilities
//! - Define one error type covering every gateway failure mode
//! - Map each failure to a client-caused (400) or server-caused (500) status
//! - Convert errors to the uniform `{"error": <text>}` JSON body at the
//!   Axum boundary, so nothing propagates to a process-level crash

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors surfaced by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Upstream call produced no decodable response: transport error or
    /// a body that is not JSON.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// Upstream answered with JSON lacking the field the caller needs
    /// (missing token, missing grant, or an explicit error payload).
    #[error("{0}")]
    UpstreamRejected(String),

    /// The request is missing an expected field or is otherwise invalid.
    #[error("{0}")]
    Validation(String),

    /// The uploaded filename's suffix is not a recognized format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file matched a recognized suffix but its contents could not be
    /// parsed as that format.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Filesystem failure, e.g. while persisting an upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected internal failures.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Convenience constructor for the common missing-request-field case.
    pub fn missing_field(name: &str) -> Self {
        GatewayError::Validation(format!("missing required field: {name}"))
    }

    /// HTTP status this error maps to at the endpoint boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamRejected(_)
            | GatewayError::Validation(_)
            | GatewayError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_)
            | GatewayError::MalformedInput(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

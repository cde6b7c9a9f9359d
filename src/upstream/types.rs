//! Upstream types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from a single upstream call.
///
/// Raised only when no decodable JSON body was obtained: `status`
/// carries the upstream HTTP status of an undecodable non-2xx response,
/// or 0 when the transport failed or a 2xx body was not JSON.
/// `raw_body` is the response text, or the transport error text.
#[derive(Debug, Error)]
#[error("status {status}: {raw_body}")]
pub struct UpstreamError {
    pub status: u16,
    pub raw_body: String,
}

/// Normalized transaction record served to the budgeting client.
///
/// Upstream may omit any field; the normalizer substitutes the defaults
/// these types encode (empty string/list, null amount) rather than fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,

    /// Transaction date as a string, whatever type upstream used.
    pub date: String,

    /// Display name of the transaction.
    pub name: String,

    /// Signed amount; None when upstream omitted it.
    pub amount: Option<f64>,

    /// Category path, treated as an opaque ordered sequence of strings.
    pub category: Vec<String>,

    /// Identifier of the owning account.
    pub account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = UpstreamError {
            status: 400,
            raw_body: r#"{"error_code":"INVALID_TOKEN"}"#.to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("INVALID_TOKEN"));
    }

    #[test]
    fn test_transaction_default_shape() {
        let tx = Transaction::default();
        assert_eq!(tx.transaction_id, "");
        assert_eq!(tx.amount, None);
        assert!(tx.category.is_empty());
    }

    #[test]
    fn test_transaction_serializes_null_amount() {
        let tx = Transaction::default();
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json["amount"].is_null());
        assert_eq!(json["category"], serde_json::json!([]));
    }
}

//! Endpoint handlers.
//!
//! Each handler does per-request work only and converts failures to the
//! uniform `{"error"}` JSON body through `GatewayError::into_response`.
//! Success shapes mirror what the budgeting client already consumes.

use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use chrono::{Duration, Local};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{GatewayError, Result};
use crate::http::server::AppState;
use crate::ingest;
use crate::upstream::{normalize_transactions, OperationKind};

/// Trailing window applied when the caller supplies no date range.
const DEFAULT_WINDOW_DAYS: i64 = 730;

/// POST /create_link_token — begin the account-linking flow.
pub async fn create_link_token(State(state): State<AppState>) -> Result<Json<Value>> {
    tracing::debug!("Creating link token");

    let client_user_id = format!("budget_app_user_{}", Local::now().timestamp());
    let mut params = Map::new();
    params.insert("client_name".to_string(), json!("Budget App"));
    params.insert("country_codes".to_string(), json!(["US"]));
    params.insert("language".to_string(), json!("en"));
    params.insert(
        "user".to_string(),
        json!({ "client_user_id": client_user_id }),
    );
    params.insert("products".to_string(), json!(["transactions"]));

    let result = state
        .upstream
        .call(OperationKind::CreateLinkSession, params)
        .await?;

    match result.get("link_token") {
        Some(token) => Ok(Json(json!({ "link_token": token }))),
        None => {
            tracing::warn!("Upstream response carried no link_token");
            Err(GatewayError::UpstreamRejected(
                "Failed to create link token".to_string(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeTokenRequest {
    pub public_token: Option<String>,
}

/// POST /exchange_token — swap a one-time public token for an access
/// grant. The grant must be persisted by the caller; the gateway stores
/// nothing.
pub async fn exchange_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>> {
    let request: ExchangeTokenRequest = serde_json::from_slice(&body)
        .map_err(|_| GatewayError::missing_field("public_token"))?;
    let public_token = request
        .public_token
        .ok_or_else(|| GatewayError::missing_field("public_token"))?;

    let mut params = Map::new();
    params.insert("public_token".to_string(), Value::String(public_token));

    let result = state
        .upstream
        .call(OperationKind::ExchangeToken, params)
        .await?;

    match result.get("access_token") {
        Some(token) => Ok(Json(json!({ "access_token": token }))),
        None => {
            tracing::warn!("Upstream response carried no access_token");
            Err(GatewayError::UpstreamRejected(
                "Failed to exchange token".to_string(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub access_token: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Compute the query window: caller-supplied bounds where present,
/// otherwise the trailing 730-day window ending today.
fn query_window(query: &TransactionsQuery) -> (String, String) {
    let today = Local::now().date_naive();
    let start = query.start_date.clone().unwrap_or_else(|| {
        (today - Duration::days(DEFAULT_WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string()
    });
    let end = query
        .end_date
        .clone()
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    (start, end)
}

/// GET /get_transactions — fetch the linked accounts and a normalized
/// transaction list for an access grant.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Value>> {
    let access_token = query
        .access_token
        .clone()
        .ok_or_else(|| GatewayError::missing_field("access_token"))?;

    let (start_date, end_date) = query_window(&query);
    tracing::debug!(
        start_date = %start_date,
        end_date = %end_date,
        "Fetching transactions"
    );

    // Accounts first; the raw array is passed through unmodified.
    let mut params = Map::new();
    params.insert("access_token".to_string(), Value::String(access_token.clone()));
    let accounts_result = state.upstream.call(OperationKind::GetAccounts, params).await?;
    let accounts = accounts_result
        .get("accounts")
        .cloned()
        .unwrap_or_else(|| json!([]));

    let mut params = Map::new();
    params.insert("access_token".to_string(), Value::String(access_token));
    params.insert("start_date".to_string(), Value::String(start_date));
    params.insert("end_date".to_string(), Value::String(end_date));
    let result = state
        .upstream
        .call(OperationKind::GetTransactions, params)
        .await?;

    if let Some(err) = result.get("error") {
        let message = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        tracing::warn!(upstream_error = %message, "Upstream rejected transaction query");
        return Err(GatewayError::UpstreamRejected(message));
    }

    let raw = result
        .get("transactions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let total = result
        .get("total_transactions")
        .cloned()
        .unwrap_or_else(|| json!(0));
    let transactions = normalize_transactions(&raw);

    tracing::debug!(
        returned = transactions.len(),
        "Returning normalized transactions"
    );

    Ok(Json(json!({
        "transactions": transactions,
        "total_transactions": total,
        "accounts": accounts,
    })))
}

/// POST /api/upload — persist and parse an uploaded tabular file.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| GatewayError::Validation(format!("invalid multipart payload: {e}")))?;
        upload = Some((filename, content));
        break;
    }
    let (filename, content) = upload.ok_or_else(|| GatewayError::missing_field("file"))?;

    tracing::debug!(filename = %filename, size = content.len(), "Received upload");

    // Persist the original bytes before parsing so a failed parse can be
    // recovered manually from the upload directory.
    state.uploads.save(&filename, &content)?;

    let records = ingest::ingest(&filename, &content)?;

    tracing::info!(filename = %filename, records = records.len(), "Upload ingested");

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "records": records,
    })))
}

/// GET /health — liveness probe, independent of upstream and filesystem
/// state.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "budget-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_730_days() {
        let query = TransactionsQuery {
            access_token: Some("grant".to_string()),
            start_date: None,
            end_date: None,
        };
        let (start, end) = query_window(&query);

        let today = Local::now().date_naive();
        assert_eq!(end, today.format("%Y-%m-%d").to_string());
        assert_eq!(
            start,
            (today - Duration::days(730)).format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_caller_supplied_window_kept() {
        let query = TransactionsQuery {
            access_token: Some("grant".to_string()),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-06-30".to_string()),
        };
        assert_eq!(
            query_window(&query),
            ("2024-01-01".to_string(), "2024-06-30".to_string())
        );
    }

    #[test]
    fn test_exchange_request_tolerates_missing_field() {
        let request: ExchangeTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.public_token.is_none());
    }
}

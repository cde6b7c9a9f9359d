//! Transaction normalization.
//!
//! Maps arbitrary upstream JSON records into the stable shape the
//! budgeting client depends on, tolerating missing and extra fields.
//!
//! # Design Decisions
//! - Never fails: a record that cannot be parsed at all contributes an
//!   all-defaults Transaction plus whatever fields were salvageable,
//!   favoring availability over strict correctness
//! - Output order matches input order; callers needing chronological
//!   order must sort upstream's response themselves

use serde_json::Value;

use crate::upstream::types::Transaction;

/// Normalize a batch of raw upstream transaction records.
pub fn normalize_transactions(raw: &[Value]) -> Vec<Transaction> {
    raw.iter().map(normalize_one).collect()
}

fn normalize_one(raw: &Value) -> Transaction {
    Transaction {
        transaction_id: string_field(raw, "transaction_id"),
        date: date_field(raw),
        name: string_field(raw, "name"),
        amount: amount_field(raw),
        category: category_field(raw),
        account_id: string_field(raw, "account_id"),
    }
}

/// Amounts are accepted as JSON numbers or as numeric strings; anything
/// else becomes null.
fn amount_field(raw: &Value) -> Option<f64> {
    match raw.get("amount") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// Dates are coerced to a string no matter how upstream typed them:
/// strings pass through unchanged, other values are rendered, and null
/// or absent becomes "".
fn date_field(raw: &Value) -> String {
    match raw.get("date") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn category_field(raw: &Value) -> Vec<String> {
    raw.get("category")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_record() {
        let raw = vec![json!({
            "transaction_id": "tx-1",
            "date": "2024-01-01",
            "name": "Coffee",
            "amount": -3.5,
            "category": ["Food and Drink", "Coffee Shop"],
            "account_id": "acct-1",
            "pending": true
        })];

        let normalized = normalize_transactions(&raw);
        assert_eq!(
            normalized,
            vec![Transaction {
                transaction_id: "tx-1".to_string(),
                date: "2024-01-01".to_string(),
                name: "Coffee".to_string(),
                amount: Some(-3.5),
                category: vec!["Food and Drink".to_string(), "Coffee Shop".to_string()],
                account_id: "acct-1".to_string(),
            }]
        );
    }

    #[test]
    fn test_absent_fields_get_defaults() {
        let raw = vec![json!({ "transaction_id": "tx-2" })];

        let normalized = normalize_transactions(&raw);
        assert_eq!(normalized[0].transaction_id, "tx-2");
        assert_eq!(normalized[0].date, "");
        assert_eq!(normalized[0].name, "");
        assert_eq!(normalized[0].amount, None);
        assert!(normalized[0].category.is_empty());
        assert_eq!(normalized[0].account_id, "");
    }

    #[test]
    fn test_unparsable_record_yields_all_defaults() {
        let raw = vec![json!("not an object"), json!(42)];

        let normalized = normalize_transactions(&raw);
        assert_eq!(normalized, vec![Transaction::default(), Transaction::default()]);
    }

    #[test]
    fn test_date_coerced_to_string() {
        let raw = vec![
            json!({ "date": 20240101 }),
            json!({ "date": null }),
            json!({ "date": "2024-02-02" }),
        ];

        let normalized = normalize_transactions(&raw);
        assert_eq!(normalized[0].date, "20240101");
        assert_eq!(normalized[1].date, "");
        assert_eq!(normalized[2].date, "2024-02-02");
    }

    #[test]
    fn test_integer_amount_accepted() {
        let raw = vec![json!({ "amount": 12 })];
        assert_eq!(normalize_transactions(&raw)[0].amount, Some(12.0));
    }

    #[test]
    fn test_string_amount_parsed() {
        let raw = vec![
            json!({ "amount": "-3.50" }),
            json!({ "amount": " 12.25 " }),
            json!({ "amount": "n/a" }),
        ];

        let normalized = normalize_transactions(&raw);
        assert_eq!(normalized[0].amount, Some(-3.5));
        assert_eq!(normalized[1].amount, Some(12.25));
        assert_eq!(normalized[2].amount, None);
    }

    #[test]
    fn test_non_string_categories_skipped() {
        let raw = vec![json!({ "category": ["Travel", 7, null] })];
        assert_eq!(
            normalize_transactions(&raw)[0].category,
            vec!["Travel".to_string()]
        );
    }

    #[test]
    fn test_output_order_matches_input() {
        let raw = vec![
            json!({ "transaction_id": "b", "date": "2024-03-01" }),
            json!({ "transaction_id": "a", "date": "2024-01-01" }),
        ];

        let normalized = normalize_transactions(&raw);
        assert_eq!(normalized[0].transaction_id, "b");
        assert_eq!(normalized[1].transaction_id, "a");
    }
}

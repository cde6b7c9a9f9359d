//! Spreadsheet (.xlsx / .xls) parsing via calamine.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::Value;
use std::io::Cursor;

use crate::error::{GatewayError, Result};
use crate::ingest::IngestedRecord;

/// Parse spreadsheet bytes into records keyed by the first row of the
/// first worksheet.
///
/// Spreadsheet cells keep their native type (string, number, bool);
/// empty cells become "". Duplicate header names are last-write-wins.
pub fn parse(content: &[u8]) -> Result<Vec<IngestedRecord>> {
    let cursor = Cursor::new(content.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| GatewayError::MalformedInput(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GatewayError::MalformedInput("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| GatewayError::MalformedInput(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = IngestedRecord::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            record.insert(name.clone(), cell_to_value(cell));
        }
        records.push(record);
    }
    Ok(records)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::String(String::new()),
        Data::String(s) => Value::String(s.clone()),
        Data::Float(f) => serde_json::json!(*f),
        Data::Int(i) => serde_json::json!(*i),
        Data::Bool(b) => Value::Bool(*b),
        // Dates, durations, and cell errors are rendered as text
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bytes_are_malformed() {
        // Plain CSV text carries no spreadsheet signature.
        let err = parse(b"date,name\n2024-01-01,Coffee\n").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedInput(_)));
    }

    #[test]
    fn test_truncated_zip_is_malformed() {
        // An xlsx is a zip container; a bare local-file header is not
        // enough to open one.
        let err = parse(b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedInput(_)));
    }

    #[test]
    fn test_workbook_parses_with_native_cell_types() {
        let bytes = include_bytes!("../../tests/fixtures/budget.xlsx");

        let records = parse(bytes).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        let headers: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(headers, ["date", "name", "amount", "settled", "memo"]);

        assert_eq!(record["date"], Value::String("2024-01-01".into()));
        assert_eq!(record["name"], Value::String("Coffee".into()));
        assert_eq!(record["amount"], serde_json::json!(-3.5));
        assert_eq!(record["settled"], Value::Bool(true));
        // The memo column has no cell in the data row.
        assert_eq!(record["memo"], Value::String(String::new()));
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(cell_to_value(&Data::String("a".into())), Value::String("a".into()));
        assert_eq!(cell_to_value(&Data::Float(1.5)), serde_json::json!(1.5));
        assert_eq!(cell_to_value(&Data::Int(7)), serde_json::json!(7));
        assert_eq!(cell_to_value(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(cell_to_value(&Data::Empty), Value::String(String::new()));
    }

    #[test]
    fn test_header_cell_rendering() {
        assert_eq!(cell_to_string(&Data::String("name".into())), "name");
        assert_eq!(cell_to_string(&Data::Float(2.0)), "2");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}

//! Delimited-text (CSV) parsing.

use csv::ReaderBuilder;
use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::ingest::IngestedRecord;

/// Parse CSV bytes into records keyed by the header row.
///
/// Cell values stay strings; no numeric coercion is applied. Duplicate
/// header names are last-write-wins in the resulting record.
pub fn parse(content: &[u8]) -> Result<Vec<IngestedRecord>> {
    let mut reader = ReaderBuilder::new().from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| GatewayError::MalformedInput(e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| GatewayError::MalformedInput(e.to_string()))?;
        let mut record = IngestedRecord::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            record.insert(name.to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }
    Ok(records)
}

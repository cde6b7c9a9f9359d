//! Tabular file ingestion subsystem.
//!
//! # Data Flow
//! ```text
//! uploaded bytes
//!     → store.rs (persist original upload, create-or-overwrite)
//!     → format.rs (filename suffix → FileFormat dispatch)
//!     → delimited.rs / sheet.rs (parse rows into field-keyed records)
//!     → Vec<IngestedRecord> back to the HTTP surface
//! ```
//!
//! # Design Decisions
//! - Format is selected purely by filename suffix; content is never
//!   sniffed, so mislabeled content fails at parse time
//! - All rows are materialized at once: interactively-sized
//!   personal-budget files only, streaming is a non-goal
//! - First row is the header; duplicate header names are last-write-wins

pub mod delimited;
pub mod format;
pub mod sheet;
pub mod store;

pub use format::FileFormat;
pub use store::UploadStore;

use crate::error::{GatewayError, Result};

/// One row of an uploaded tabular file, keyed by header column name.
///
/// Field order follows the source file's column order (serde_json is
/// built with preserve_order).
pub type IngestedRecord = serde_json::Map<String, serde_json::Value>;

/// Parse an uploaded file into field-keyed records.
///
/// Fails with `UnsupportedFormat` when the filename suffix is not
/// recognized, and `MalformedInput` when the contents cannot be parsed
/// as the format the suffix claims.
pub fn ingest(filename: &str, content: &[u8]) -> Result<Vec<IngestedRecord>> {
    let format = FileFormat::from_filename(filename)
        .ok_or_else(|| GatewayError::UnsupportedFormat(filename.to_string()))?;
    (format.parser())(content)
}

//! Filename-suffix format dispatch.

use crate::error::Result;
use crate::ingest::{delimited, sheet, IngestedRecord};

/// Parser signature shared by all formats.
pub type ParserFn = fn(&[u8]) -> Result<Vec<IngestedRecord>>;

/// Recognized tabular file formats.
///
/// Dispatch is a closed suffix → parser table: adding a format means
/// adding a variant and one arm in each match below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-delimited text (`.csv`).
    Csv,
    /// Office Open XML spreadsheet (`.xlsx`).
    Xlsx,
    /// Legacy binary spreadsheet (`.xls`).
    Xls,
}

impl FileFormat {
    /// Select a format from the filename suffix alone.
    ///
    /// Content is never sniffed. Returns None for unrecognized suffixes
    /// and for names without a suffix.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, suffix) = filename.rsplit_once('.')?;
        match suffix.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            "xls" => Some(FileFormat::Xls),
            _ => None,
        }
    }

    /// Parser for this format.
    pub fn parser(&self) -> ParserFn {
        match self {
            FileFormat::Csv => delimited::parse,
            FileFormat::Xlsx | FileFormat::Xls => sheet::parse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_mapping() {
        assert_eq!(FileFormat::from_filename("a.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_filename("a.xlsx"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_filename("a.xls"), Some(FileFormat::Xls));
    }

    #[test]
    fn test_suffix_case_insensitive() {
        assert_eq!(
            FileFormat::from_filename("Budget.CSV"),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            FileFormat::from_filename("Budget.XlSx"),
            Some(FileFormat::Xlsx)
        );
    }

    #[test]
    fn test_unrecognized_suffixes() {
        assert_eq!(FileFormat::from_filename("notes.txt"), None);
        assert_eq!(FileFormat::from_filename("archive.tar.gz"), None);
        assert_eq!(FileFormat::from_filename("no_extension"), None);
    }

    #[test]
    fn test_only_final_suffix_considered() {
        // The suffix is whatever follows the last dot.
        assert_eq!(
            FileFormat::from_filename("export.2024.csv"),
            Some(FileFormat::Csv)
        );
        assert_eq!(FileFormat::from_filename("export.csv.bak"), None);
    }
}

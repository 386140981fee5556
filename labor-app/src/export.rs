//! CSV export of the calculation history.
//!
//! ## CSV format
//!
//! | Column       | Type    | Notes                                   |
//! |--------------|---------|-----------------------------------------|
//! | `id`         | integer | creation time in milliseconds           |
//! | `timestamp`  | string  | RFC 3339, UTC                           |
//! | `calculator` | string  | `연차계산`, `퇴직금계산` or `야근수당계산` |
//! | `summary`    | string  | e.g. `12일`, `1,234,567원`                |
//!
//! Rows are written newest first, the order the history keeps them in.

use std::io::Write;

use labor_core::HistoryEntry;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    timestamp: String,
    calculator: &'a str,
    summary: String,
}

impl<'a> From<&'a HistoryEntry> for CsvRow<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp.to_rfc3339(),
            calculator: entry.calculator.label(),
            summary: entry.result.summary(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `entries` as CSV with a header row.
pub fn write_history_csv<W: Write>(
    writer: W,
    entries: &[HistoryEntry],
) -> Result<(), CsvExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        csv.write_record(["id", "timestamp", "calculator", "summary"])?;
    }
    for entry in entries {
        csv.serialize(CsvRow::from(entry))?;
    }
    csv.flush()?;
    Ok(())
}

/// [`write_history_csv`] into a string.
pub fn history_to_csv_string(entries: &[HistoryEntry]) -> Result<String, CsvExportError> {
    let mut buf = Vec::new();
    write_history_csv(&mut buf, entries)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

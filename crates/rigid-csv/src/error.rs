//! Error types for CSV sources and sinks.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing CSV rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to open a CSV file.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV reader or writer failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("failed to flush CSV output: {0}")]
    Flush(#[from] std::io::Error),

    /// A header line was requested but no headers are known.
    #[error("no headers configured")]
    NoHeaders,

    /// A keyed record has more fields than the header line.
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The header line names a column more than once.
    #[error("header '{name}' appears more than once")]
    DuplicateHeader { name: String },

    /// A keyed row names a column missing from the headers.
    #[error("field '{name}' is not in the headers")]
    UnknownField { name: String },
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

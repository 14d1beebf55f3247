//! Error types for rule evaluation, row validation, and wrapped I/O.

use thiserror::Error;

use crate::row::{ColumnKey, Row};
use crate::value::Value;

/// Outcome of a rule that did not produce a value.
///
/// `DropRow` is a row-scoped signal rather than a failure: the pipeline
/// consumes it and the wrapper treats the row as absent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// The value could not be validated or repaired.
    #[error("{message}: {value:?}")]
    Invalid { value: Value, message: String },

    /// Stop processing the current row and exclude it from output.
    #[error("row dropped")]
    DropRow,
}

impl RuleError {
    pub fn invalid(value: impl Into<Value>, message: impl Into<String>) -> Self {
        Self::Invalid {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, RuleError::DropRow)
    }
}

/// Result of a single rule operation.
pub type RuleResult = std::result::Result<Value, RuleError>;

/// Errors raised while validating a row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A rule rejected the value of a column.
    #[error("column {key}: rule {rule} failed: {message}: {value:?}")]
    Rule {
        key: ColumnKey,
        rule: &'static str,
        value: Value,
        message: String,
        row: Row,
    },

    /// The row lacks a column the pipeline has rules for.
    #[error("column {key} not found in row {row}")]
    MissingColumn { key: ColumnKey, row: Row },

    /// The row is keyed but the rules are index-addressed, or the reverse.
    #[error("{rules}-addressed rules cannot validate a {row} row")]
    ShapeMismatch {
        rules: &'static str,
        row: &'static str,
    },
}

/// Errors surfaced by the [`Rigidity`](crate::Rigidity) wrapper.
#[derive(Debug, Error)]
pub enum RigidError {
    /// A row failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The wrapped source failed to produce a row.
    #[error("row source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The wrapped sink failed to accept a row.
    #[error("row sink failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RigidError {
    pub fn source_failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Source(err.into())
    }

    pub fn sink_failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Sink(err.into())
    }
}

/// Result type for wrapper operations.
pub type Result<T> = std::result::Result<T, RigidError>;

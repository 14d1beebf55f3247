//! Row validation and correction for tabular data.
//!
//! A [`Pipeline`] binds an ordered chain of [`Rule`]s to each column. Rows
//! read from a source are passed through every rule's `read` operation and
//! rows written to a sink through every rule's `write` operation. A rule can
//! reject a value, repair it, or drop the whole row.
//!
//! [`Rigidity`] wraps any [`RowSource`] or [`RowSink`] so validation happens
//! transparently while the caller keeps reading and writing rows as before.
//!
//! # Example
//!
//! ```
//! use rigid_core::rules::{Integer, Strip};
//! use rigid_core::{MemorySource, NumericAction, Pipeline, Rigidity, Row, RuleChain, Value};
//!
//! let rules: Vec<RuleChain> = vec![
//!     vec![Box::new(Strip::new())],
//!     vec![Box::new(Integer::new(NumericAction::DropRow))],
//! ];
//! let source = MemorySource::new([
//!     Row::sequence([" widget ", "three"]),
//!     Row::sequence(["gadget", "4"]),
//! ]);
//! let mut reader = Rigidity::new(source, Pipeline::new(rules));
//!
//! let row = reader.read_row()?.expect("one row survives");
//! assert_eq!(row, Row::sequence([Value::from("gadget"), Value::Int(4)]));
//! assert!(reader.read_row()?.is_none());
//! # Ok::<(), rigid_core::RigidError>(())
//! ```

pub mod config;
mod error;
mod memory;
mod pipeline;
mod row;
mod rule;
pub mod rules;
mod value;
mod wrapper;

// === Errors ===
pub use error::{Result, RigidError, RuleError, RuleResult, ValidationError};

// === Values and rows ===
pub use row::{ColumnKey, Row};
pub use value::{Value, ValueKey};

// === Rules ===
pub use rule::{Direction, FallbackAction, MissingAction, NumericAction, Rule, UniqueAction};

// === Pipeline ===
pub use pipeline::{
    DiagnosticSink, DisplayMode, Pipeline, RowOutcome, RuleChain, RuleSet, format_diagnostic,
};

// === Wrapper ===
pub use memory::{MemoryError, MemorySink, MemorySource};
pub use wrapper::{Rigidity, RowSink, RowSource, RowStats, TableMetadata};

// === Configuration ===
pub use config::{ConfigError, RulesConfig};

//! CSV sources and sinks for validation pipelines.
//!
//! [`CsvSource`] and [`CsvSink`] adapt the `csv` crate's reader and writer
//! to the [`RowSource`](rigid_core::RowSource) and
//! [`RowSink`](rigid_core::RowSink) traits, so they can be wrapped in a
//! [`Rigidity`](rigid_core::Rigidity).
//!
//! # Example
//!
//! ```
//! use rigid_core::rules::Upper;
//! use rigid_core::{Pipeline, Rigidity, RuleChain};
//! use rigid_csv::{CsvSink, CsvSource};
//!
//! let rules: Vec<RuleChain> = vec![vec![Box::new(Upper)]];
//! let source = CsvSource::sequence("ab,cd\n".as_bytes());
//! let mut reader = Rigidity::new(source, Pipeline::new(rules.clone()));
//! let mut writer = Rigidity::new(CsvSink::sequence(Vec::new()), Pipeline::new(rules));
//! while let Some(row) = reader.read_row()? {
//!     writer.write_row(row)?;
//! }
//! let bytes = writer.into_inner().into_inner()?;
//! assert_eq!(bytes, b"AB,cd\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::{CsvError, Result};
pub use reader::CsvSource;
pub use writer::CsvSink;

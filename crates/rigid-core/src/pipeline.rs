//! Row validation: per-column rule chains folded over each field.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{RuleError, ValidationError};
use crate::row::{ColumnKey, Row};
use crate::rule::{Direction, Rule};
use crate::value::Value;

/// Ordered rules bound to one column.
pub type RuleChain = Vec<Box<dyn Rule>>;

/// Rule chains addressed either by position or by column name.
#[derive(Debug, Clone)]
pub enum RuleSet {
    Indexed(Vec<RuleChain>),
    Named(IndexMap<String, RuleChain>),
}

impl RuleSet {
    /// Number of declared columns.
    pub fn len(&self) -> usize {
        match self {
            RuleSet::Indexed(chains) => chains.len(),
            RuleSet::Named(chains) => chains.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<RuleChain>> for RuleSet {
    fn from(chains: Vec<RuleChain>) -> Self {
        RuleSet::Indexed(chains)
    }
}

impl From<IndexMap<String, RuleChain>> for RuleSet {
    fn from(chains: IndexMap<String, RuleChain>) -> Self {
        RuleSet::Named(chains)
    }
}

/// Whether validation failures are echoed to the diagnostic sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    None,
    Simple,
}

/// Result of validating one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The row survived, possibly corrected.
    Accepted(Row),
    /// A rule asked for the row to be dropped.
    Dropped,
}

impl RowOutcome {
    pub fn into_row(self) -> Option<Row> {
        match self {
            RowOutcome::Accepted(row) => Some(row),
            RowOutcome::Dropped => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, RowOutcome::Dropped)
    }
}

/// Shared writer receiving human-readable failure reports.
///
/// Clones share the same underlying writer.
#[derive(Clone)]
pub struct DiagnosticSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl DiagnosticSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    fn report(&self, text: &str) -> io::Result<()> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("diagnostic sink lock poisoned"))?;
        guard.write_all(text.as_bytes())?;
        guard.flush()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink").finish_non_exhaustive()
    }
}

/// Render the report written in [`DisplayMode::Simple`].
pub fn format_diagnostic(error: &ValidationError) -> String {
    match error {
        ValidationError::Rule {
            key,
            rule,
            value,
            message,
            row,
        } => format!(
            "Validation failed on column {key} using rule {rule}\n  row: {row}\n  error: {message}: {value:?}\n"
        ),
        other => format!("Validation failed: {other}\n"),
    }
}

/// Validates rows by applying each column's rule chain.
///
/// The columns validated are fixed when the pipeline is built. Fields
/// outside them are left untouched. Cloning a pipeline deep-copies its
/// rules, including any state they have accumulated.
#[derive(Debug, Clone)]
pub struct Pipeline {
    chains: Vec<(ColumnKey, RuleChain)>,
    named: bool,
    display: DisplayMode,
    diagnostics: DiagnosticSink,
}

impl Pipeline {
    pub fn new(rules: impl Into<RuleSet>) -> Self {
        let (chains, named) = match rules.into() {
            RuleSet::Indexed(chains) => (
                chains
                    .into_iter()
                    .enumerate()
                    .map(|(idx, chain)| (ColumnKey::Index(idx), chain))
                    .collect(),
                false,
            ),
            RuleSet::Named(chains) => (
                chains
                    .into_iter()
                    .map(|(name, chain)| (ColumnKey::Name(name), chain))
                    .collect(),
                true,
            ),
        };
        Self {
            chains,
            named,
            display: DisplayMode::None,
            diagnostics: DiagnosticSink::default(),
        }
    }

    /// Set the display mode.
    #[must_use]
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Replace the diagnostic sink (stderr by default).
    #[must_use]
    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Active column keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.chains.iter().map(|(key, _)| key)
    }

    /// Whether rules are addressed by column name.
    pub fn is_named(&self) -> bool {
        self.named
    }

    /// Rule chain for `key`.
    pub fn chain(&self, key: &ColumnKey) -> Option<&[Box<dyn Rule>]> {
        self.chains
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, chain)| chain.as_slice())
    }

    /// Validate a row coming from a source.
    pub fn validate_read(&mut self, row: Row) -> Result<RowOutcome, ValidationError> {
        self.validate(Direction::Read, row)
    }

    /// Validate a row headed for a sink.
    pub fn validate_write(&mut self, row: Row) -> Result<RowOutcome, ValidationError> {
        self.validate(Direction::Write, row)
    }

    fn validate(
        &mut self,
        direction: Direction,
        mut row: Row,
    ) -> Result<RowOutcome, ValidationError> {
        for (key, chain) in &mut self.chains {
            if chain.is_empty() {
                continue;
            }
            if self.named != row.is_keyed() {
                return Err(ValidationError::ShapeMismatch {
                    rules: if self.named { "name" } else { "index" },
                    row: if row.is_keyed() { "keyed" } else { "sequence" },
                });
            }
            let Some(slot) = row.get_mut(key) else {
                return Err(ValidationError::MissingColumn {
                    key: key.clone(),
                    row,
                });
            };
            let mut value = std::mem::replace(slot, Value::Null);
            for rule in chain.iter_mut() {
                match direction.run(rule.as_mut(), value) {
                    Ok(next) => value = next,
                    Err(RuleError::DropRow) => {
                        debug!(column = %key, rule = rule.name(), %direction, "row dropped");
                        return Ok(RowOutcome::Dropped);
                    }
                    Err(RuleError::Invalid { value, message }) => {
                        row.set(key, value.clone());
                        let error = ValidationError::Rule {
                            key: key.clone(),
                            rule: rule.name(),
                            value,
                            message,
                            row,
                        };
                        if self.display == DisplayMode::Simple {
                            let text = format_diagnostic(&error);
                            if let Err(io_error) = self.diagnostics.report(&text) {
                                warn!(error = %io_error, "failed to write diagnostic");
                            }
                        }
                        return Err(error);
                    }
                }
            }
            row.set(key, value);
        }
        trace!(%direction, "row validated");
        Ok(RowOutcome::Accepted(row))
    }
}

//! Validate a CSV file through a configured rule pipeline.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use rigid_core::{DisplayMode, Rigidity, RowStats, RulesConfig};
use rigid_csv::{CsvSink, CsvSource};

/// Inputs to a validation run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub input: PathBuf,
    pub rules: PathBuf,
    /// Address columns by header name instead of position.
    pub keyed: bool,
    /// Treat the first line as a header (always true when keyed).
    pub header: bool,
    /// Overrides the display mode from the rules file.
    pub display: Option<DisplayMode>,
}

/// Row counts from a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub read: RowStats,
    pub write: RowStats,
}

impl CheckSummary {
    pub fn rows_read(&self) -> usize {
        self.read.read
    }

    pub fn rows_written(&self) -> usize {
        self.write.written
    }

    pub fn rows_dropped(&self) -> usize {
        self.read.dropped + self.write.dropped
    }
}

/// Read `options.input`, validate every row on read and again on write, and
/// write the surviving rows to `output`.
///
/// Stops at the first row that fails validation.
pub fn run_check<W: Write>(options: &CheckOptions, output: W) -> Result<CheckSummary> {
    let span = info_span!("check", input = %options.input.display());
    let _guard = span.enter();

    let mut config = RulesConfig::from_path(&options.rules)
        .with_context(|| format!("load rules: {}", options.rules.display()))?;
    if let Some(display) = options.display {
        config.display = display;
    }
    let read_pipeline = config.build().context("build read pipeline")?;
    let write_pipeline = config.build().context("build write pipeline")?;

    let source = CsvSource::from_path(&options.input, options.keyed)
        .with_context(|| format!("open input: {}", options.input.display()))?;
    let mut reader = Rigidity::new(source, read_pipeline);

    let headers = if options.keyed {
        reader.headers().map(<[String]>::to_vec)
    } else if options.header {
        reader
            .skip_row()
            .context("read header line")?
            .map(|row| row.values().map(ToString::to_string).collect())
    } else {
        None
    };
    debug!(headers = ?headers, "resolved header line");

    let has_headers = headers.is_some();
    let mut writer = Rigidity::new(CsvSink::new(output, headers), write_pipeline);
    if has_headers {
        writer.write_header().context("write header line")?;
    }

    for row in reader.by_ref() {
        let row = row.context("validate input row")?;
        writer.write_row(row).context("validate output row")?;
    }
    let write_stats = writer.stats();
    writer.into_inner().flush().context("flush output")?;

    let summary = CheckSummary {
        read: reader.stats(),
        write: write_stats,
    };
    info!(
        read = summary.rows_read(),
        written = summary.rows_written(),
        dropped = summary.rows_dropped(),
        "validation complete"
    );
    Ok(summary)
}

//! The validating wrapper around a row source or sink.

use tracing::debug;

use crate::error::{RigidError, Result};
use crate::pipeline::{Pipeline, RowOutcome};
use crate::row::Row;

/// Produces rows, signalling exhaustion with `Ok(None)`.
pub trait RowSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn next_row(&mut self) -> std::result::Result<Option<Row>, Self::Error>;
}

/// Accepts rows and an optional header line.
pub trait RowSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_header(&mut self) -> std::result::Result<(), Self::Error>;

    fn write_row(&mut self, row: &Row) -> std::result::Result<(), Self::Error>;
}

/// Metadata a tabular collaborator may expose.
pub trait TableMetadata {
    /// Column names, when the collaborator knows them.
    fn headers(&self) -> Option<&[String]>;
}

/// Row counters kept by a [`Rigidity`] wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    /// Rows fetched for validation, including dropped ones.
    pub read: usize,
    /// Rows forwarded to the sink.
    pub written: usize,
    /// Rows dropped by a rule in either direction.
    pub dropped: usize,
}

/// Wraps a tabular reader or writer so every row passes through a
/// [`Pipeline`].
///
/// Rows read are validated with [`Pipeline::validate_read`]; rows written
/// with [`Pipeline::validate_write`]. Dropped rows are skipped on read and
/// never reach the sink on write. Header rows bypass validation.
#[derive(Debug)]
pub struct Rigidity<T> {
    inner: T,
    pipeline: Pipeline,
    stats: RowStats,
}

impl<T> Rigidity<T> {
    pub fn new(inner: T, pipeline: Pipeline) -> Self {
        Self {
            inner,
            pipeline,
            stats: RowStats::default(),
        }
    }

    /// The wrapped collaborator.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutable access to the wrapped collaborator. Rows moved through it
    /// directly are not validated.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn stats(&self) -> RowStats {
        self.stats
    }
}

impl<T: TableMetadata> Rigidity<T> {
    /// Column names reported by the wrapped collaborator.
    pub fn headers(&self) -> Option<&[String]> {
        self.inner.headers()
    }
}

impl<T: RowSource> Rigidity<T> {
    /// Next row that survives validation, or `None` once the source is
    /// exhausted.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        loop {
            let Some(row) = self.fetch()? else {
                debug!(
                    read = self.stats.read,
                    dropped = self.stats.dropped,
                    "row source exhausted"
                );
                return Ok(None);
            };
            match self.pipeline.validate_read(row)? {
                RowOutcome::Accepted(row) => return Ok(Some(row)),
                RowOutcome::Dropped => self.stats.dropped += 1,
            }
        }
    }

    /// Next row from the source without validation, e.g. a header line.
    pub fn skip_row(&mut self) -> Result<Option<Row>> {
        self.inner.next_row().map_err(RigidError::source_failed)
    }

    fn fetch(&mut self) -> Result<Option<Row>> {
        let row = self.inner.next_row().map_err(RigidError::source_failed)?;
        if row.is_some() {
            self.stats.read += 1;
        }
        Ok(row)
    }
}

impl<T: RowSource> Iterator for Rigidity<T> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}

impl<T: RowSink> Rigidity<T> {
    /// Write the header line without validation.
    pub fn write_header(&mut self) -> Result<()> {
        self.inner.write_header().map_err(RigidError::sink_failed)
    }

    /// Validate and write one row. Dropped rows are discarded silently.
    pub fn write_row(&mut self, row: Row) -> Result<()> {
        match self.pipeline.validate_write(row)? {
            RowOutcome::Accepted(row) => {
                self.inner
                    .write_row(&row)
                    .map_err(RigidError::sink_failed)?;
                self.stats.written += 1;
            }
            RowOutcome::Dropped => self.stats.dropped += 1,
        }
        Ok(())
    }

    /// Validate and write each row in turn, returning how many reached the
    /// sink.
    ///
    /// Rows are written as they are validated, so on error the rows before
    /// the failing one may already be in the sink.
    pub fn write_rows<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Row>,
    {
        let before = self.stats.written;
        for row in rows {
            self.write_row(row)?;
        }
        Ok(self.stats.written - before)
    }
}

//! In-memory row sources and sinks.

use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::row::Row;
use crate::wrapper::{RowSink, RowSource, TableMetadata};

/// Errors from [`MemorySink`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("sink has no headers to write")]
    NoHeaders,
}

/// Yields rows from a queue.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: VecDeque<Row>,
    headers: Option<Vec<String>>,
}

impl MemorySource {
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            headers: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Rows not yet produced.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemorySource {
    type Error = Infallible;

    fn next_row(&mut self) -> Result<Option<Row>, Self::Error> {
        Ok(self.rows.pop_front())
    }
}

impl TableMetadata for MemorySource {
    fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

/// Collects written rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    headers: Option<Vec<String>>,
    header_writes: usize,
    rows: Vec<Row>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// How many times the header line was written.
    pub fn header_writes(&self) -> usize {
        self.header_writes
    }
}

impl RowSink for MemorySink {
    type Error = MemoryError;

    fn write_header(&mut self) -> Result<(), Self::Error> {
        if self.headers.is_none() {
            return Err(MemoryError::NoHeaders);
        }
        self.header_writes += 1;
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> Result<(), Self::Error> {
        self.rows.push(row.clone());
        Ok(())
    }
}

impl TableMetadata for MemorySink {
    fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

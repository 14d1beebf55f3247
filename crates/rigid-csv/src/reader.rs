//! CSV row source.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexMap;
use tracing::debug;

use rigid_core::{Row, RowSource, TableMetadata, Value};

use crate::error::{CsvError, Result};

/// Reads CSV records as rows.
///
/// In sequence mode every line, including any header line, is a row. In
/// keyed mode the first line names the columns and each following record
/// becomes a keyed row; short records are padded with nulls.
#[derive(Debug)]
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    headers: Option<Vec<String>>,
    record: StringRecord,
}

impl CsvSource<File> {
    /// Open a file in sequence or keyed mode.
    pub fn from_path(path: &Path, keyed: bool) -> Result<Self> {
        let file = File::open(path).map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if keyed {
            Self::keyed(file)
        } else {
            Ok(Self::sequence(file))
        }
    }
}

impl<R: Read> CsvSource<R> {
    /// Yield every record as a sequence row.
    pub fn sequence(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        Self {
            reader,
            headers: None,
            record: StringRecord::new(),
        }
    }

    /// Read the header line and yield keyed rows. Repeated header names are
    /// rejected.
    pub fn keyed(input: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut seen = HashSet::with_capacity(headers.len());
        if let Some(name) = headers.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(CsvError::DuplicateHeader { name: name.clone() });
        }
        debug!(columns = headers.len(), "read CSV headers");
        Ok(Self {
            reader,
            headers: Some(headers),
            record: StringRecord::new(),
        })
    }

    fn keyed_row(&self, headers: &[String]) -> Result<Row> {
        if self.record.len() > headers.len() {
            return Err(CsvError::FieldCount {
                line: self.record.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                found: self.record.len(),
            });
        }
        let fields: IndexMap<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = self.record.get(idx).map_or(Value::Null, Value::from);
                (name.clone(), value)
            })
            .collect();
        Ok(Row::Keyed(fields))
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    type Error = CsvError;

    fn next_row(&mut self) -> Result<Option<Row>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        match &self.headers {
            Some(headers) => self.keyed_row(headers).map(Some),
            None => Ok(Some(Row::sequence(self.record.iter()))),
        }
    }
}

impl<R> TableMetadata for CsvSource<R> {
    fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

//! CSV row sink.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use rigid_core::{Row, RowSink, TableMetadata, Value};

use crate::error::{CsvError, Result};

/// Writes rows as CSV records.
///
/// Sequence rows are written field by field. Keyed rows are laid out in
/// header order, with absent columns written empty; a keyed row naming a
/// column outside the headers is rejected.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    headers: Option<Vec<String>>,
}

impl CsvSink<File> {
    /// Create (or truncate) a file for writing.
    pub fn from_path(path: &Path, headers: Option<Vec<String>>) -> Result<Self> {
        let file = File::create(path).map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file, headers))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(output: W, headers: Option<Vec<String>>) -> Self {
        let writer = WriterBuilder::new().flexible(true).from_writer(output);
        Self { writer, headers }
    }

    /// Sink without headers, for sequence rows.
    pub fn sequence(output: W) -> Self {
        Self::new(output, None)
    }

    /// Sink laying keyed rows out by `headers`.
    pub fn keyed(output: W, headers: Vec<String>) -> Self {
        Self::new(output, Some(headers))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| CsvError::Flush(err.into_error()))
    }

    fn record_fields(&self, row: &Row) -> Result<Vec<Vec<u8>>> {
        let (Some(headers), Row::Keyed(fields)) = (&self.headers, row) else {
            return Ok(row.values().map(Value::to_field).collect());
        };
        if let Some(name) = fields.keys().find(|name| !headers.contains(*name)) {
            return Err(CsvError::UnknownField { name: name.clone() });
        }
        Ok(headers
            .iter()
            .map(|name| fields.get(name).map(Value::to_field).unwrap_or_default())
            .collect())
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    type Error = CsvError;

    fn write_header(&mut self) -> Result<()> {
        let headers = self.headers.as_ref().ok_or(CsvError::NoHeaders)?;
        self.writer.write_record(headers)?;
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        let fields = self.record_fields(row)?;
        self.writer.write_record(&fields)?;
        Ok(())
    }
}

impl<W: Write> TableMetadata for CsvSink<W> {
    fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: CsvSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_sequence_rows() {
        let mut sink = CsvSink::sequence(Vec::new());
        sink.write_row(&Row::sequence([
            Value::from("a,b"),
            Value::Int(3),
            Value::Float(1.5),
            Value::Bool(false),
            Value::Null,
        ]))
        .unwrap();
        assert_eq!(output(sink), "\"a,b\",3,1.5,False,\n");
    }

    #[test]
    fn test_sequence_sink_has_no_header() {
        let mut sink = CsvSink::sequence(Vec::new());
        assert!(matches!(sink.write_header(), Err(CsvError::NoHeaders)));
    }

    #[test]
    fn test_keyed_rows_follow_header_order() {
        let mut sink = CsvSink::keyed(Vec::new(), vec!["a".into(), "b".into(), "c".into()]);
        sink.write_header().unwrap();
        sink.write_row(&Row::keyed([("c", "3"), ("a", "1")])).unwrap();
        assert_eq!(output(sink), "a,b,c\n1,,3\n");
    }

    #[test]
    fn test_keyed_rejects_unknown_field() {
        let mut sink = CsvSink::keyed(Vec::new(), vec!["a".into()]);
        let err = sink.write_row(&Row::keyed([("z", "1")])).unwrap_err();
        assert!(matches!(err, CsvError::UnknownField { name } if name == "z"));
    }

    #[test]
    fn test_bytes_written_raw() {
        let mut sink = CsvSink::sequence(Vec::new());
        sink.write_row(&Row::sequence([Value::Bytes(b"raw".to_vec())]))
            .unwrap();
        assert_eq!(output(sink), "raw\n");
    }
}

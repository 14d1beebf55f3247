//! Integration tests for the validating wrapper.

use std::convert::Infallible;

use rigid_core::rules::{Drop, Integer, Unique, Upper};
use rigid_core::{
    MemoryError, MemorySink, MemorySource, NumericAction, Pipeline, RigidError, Rigidity, Row,
    RowSink, RowStats, RuleChain, UniqueAction, ValidationError, Value,
};

fn drop_on_bad_integer() -> Pipeline {
    let rules: Vec<RuleChain> = vec![vec![Box::new(Integer::new(NumericAction::DropRow))]];
    Pipeline::new(rules)
}

/// Sink that counts calls, to check dropped rows never reach it.
#[derive(Debug, Default)]
struct CountingSink {
    header_calls: usize,
    row_calls: usize,
}

impl RowSink for CountingSink {
    type Error = Infallible;

    fn write_header(&mut self) -> Result<(), Self::Error> {
        self.header_calls += 1;
        Ok(())
    }

    fn write_row(&mut self, _row: &Row) -> Result<(), Self::Error> {
        self.row_calls += 1;
        Ok(())
    }
}

#[test]
fn test_read_skips_dropped_rows() {
    let source = MemorySource::new([Row::sequence(["nope"]), Row::sequence(["2"])]);
    let mut reader = Rigidity::new(source, drop_on_bad_integer());

    assert_eq!(
        reader.read_row().unwrap(),
        Some(Row::Sequence(vec![Value::Int(2)]))
    );
    assert_eq!(reader.read_row().unwrap(), None);
    assert_eq!(reader.read_row().unwrap(), None);
    assert_eq!(
        reader.stats(),
        RowStats {
            read: 2,
            written: 0,
            dropped: 1
        }
    );
}

#[test]
fn test_iterator_yields_validated_rows() {
    let source = MemorySource::new([
        Row::sequence(["x"]),
        Row::sequence(["1"]),
        Row::sequence(["y"]),
        Row::sequence(["3"]),
    ]);
    let reader = Rigidity::new(source, drop_on_bad_integer());
    let rows: Vec<Row> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(
        rows,
        vec![
            Row::Sequence(vec![Value::Int(1)]),
            Row::Sequence(vec![Value::Int(3)]),
        ]
    );
}

#[test]
fn test_all_rows_dropped_signals_end() {
    let source = MemorySource::new([Row::sequence(["a"]), Row::sequence(["b"])]);
    let mut reader = Rigidity::new(source, drop_on_bad_integer());
    assert!(reader.next().is_none());
    assert_eq!(reader.get_ref().remaining(), 0);
}

#[test]
fn test_read_failure_propagates() {
    let rules: Vec<RuleChain> = vec![vec![Box::new(Integer::default())]];
    let source = MemorySource::new([Row::sequence(["bad"]), Row::sequence(["1"])]);
    let mut reader = Rigidity::new(source, Pipeline::new(rules));
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        RigidError::Validation(ValidationError::Rule { rule: "Integer", .. })
    ));
    // The failing row is consumed; reading resumes with the next one.
    assert_eq!(
        reader.next().unwrap().unwrap(),
        Row::Sequence(vec![Value::Int(1)])
    );
}

#[test]
fn test_skip_bypasses_validation() {
    let source = MemorySource::new([Row::sequence(["count"]), Row::sequence(["5"])]);
    let mut reader = Rigidity::new(source, drop_on_bad_integer());
    assert_eq!(reader.skip_row().unwrap(), Some(Row::sequence(["count"])));
    assert_eq!(
        reader.read_row().unwrap(),
        Some(Row::Sequence(vec![Value::Int(5)]))
    );
}

#[test]
fn test_write_header_passes_through() {
    let mut writer = Rigidity::new(CountingSink::default(), drop_on_bad_integer());
    writer.write_header().unwrap();
    assert_eq!(writer.get_ref().header_calls, 1);
    assert_eq!(writer.get_ref().row_calls, 0);
}

#[test]
fn test_dropped_write_never_reaches_sink() {
    let mut writer = Rigidity::new(CountingSink::default(), drop_on_bad_integer());
    writer.write_row(Row::sequence(["not a number"])).unwrap();
    assert_eq!(writer.get_ref().row_calls, 0);
    assert_eq!(writer.stats().dropped, 1);
}

#[test]
fn test_writerow_with_and_without_rules() {
    let rules: Vec<RuleChain> = vec![vec![], vec![]];
    let mut writer = Rigidity::new(MemorySink::new(), Pipeline::new(rules));
    writer.write_row(Row::sequence(["hello", "world"])).unwrap();
    writer
        .write_row(Row::sequence([Value::Int(1), Value::Int(2)]))
        .unwrap();
    assert_eq!(
        writer.get_ref().rows(),
        &[
            Row::sequence(["hello", "world"]),
            Row::sequence([Value::Int(1), Value::Int(2)]),
        ]
    );

    let rules: Vec<RuleChain> = vec![vec![Box::new(Drop)], vec![Box::new(Drop)]];
    let mut writer = Rigidity::new(MemorySink::new(), Pipeline::new(rules));
    writer.write_row(Row::sequence(["hello", "world"])).unwrap();
    writer
        .write_row(Row::sequence([Value::Int(1), Value::Int(2)]))
        .unwrap();
    let blank = Row::sequence(["", ""]);
    assert_eq!(writer.get_ref().rows(), &[blank.clone(), blank]);
}

#[test]
fn test_write_rows_counts_and_stops_on_failure() {
    let rules: Vec<RuleChain> = vec![vec![
        Box::new(Upper),
        Box::new(Unique::new(UniqueAction::DropRow)),
    ]];
    let mut writer = Rigidity::new(MemorySink::new(), Pipeline::new(rules));
    let written = writer
        .write_rows([
            Row::sequence(["a"]),
            Row::sequence(["A"]),
            Row::sequence(["b"]),
        ])
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(
        writer.get_ref().rows(),
        &[Row::sequence(["A"]), Row::sequence(["B"])]
    );

    let rules: Vec<RuleChain> = vec![vec![Box::new(Integer::default())]];
    let mut writer = Rigidity::new(MemorySink::new(), Pipeline::new(rules));
    let result = writer.write_rows([
        Row::sequence(["1"]),
        Row::sequence(["two"]),
        Row::sequence(["3"]),
    ]);
    assert!(result.is_err());
    assert_eq!(writer.get_ref().rows().len(), 1);
}

#[test]
fn test_sink_errors_propagate() {
    let rules: Vec<RuleChain> = vec![];
    let mut writer = Rigidity::new(MemorySink::new(), Pipeline::new(rules));
    let err = writer.write_header().unwrap_err();
    match err {
        RigidError::Sink(source) => {
            assert_eq!(
                source.downcast_ref::<MemoryError>(),
                Some(&MemoryError::NoHeaders)
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_headers_are_an_explicit_accessor() {
    let headers = vec!["a".to_string(), "b".to_string()];
    let sink = MemorySink::new().with_headers(headers.clone());
    let rules: Vec<RuleChain> = vec![];
    let mut writer = Rigidity::new(sink, Pipeline::new(rules));
    assert_eq!(writer.headers(), Some(headers.as_slice()));
    writer.write_header().unwrap();
    assert_eq!(writer.into_inner().header_writes(), 1);
}

#[test]
fn test_keyed_rows_round_trip() {
    let mut rules = indexmap::IndexMap::new();
    let chain: RuleChain = vec![Box::new(Integer::default())];
    rules.insert("qty".to_string(), chain);
    let source = MemorySource::new([Row::keyed([("name", "bolt"), ("qty", "12")])]);
    let mut reader = Rigidity::new(source, Pipeline::new(rules));
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(
        row,
        Row::keyed([("name", Value::from("bolt")), ("qty", Value::Int(12))])
    );
}

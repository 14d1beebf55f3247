//! File round-trips through validating CSV readers and writers.

use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

use rigid_core::{Rigidity, RulesConfig};
use rigid_csv::{CsvSink, CsvSource};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const RULES: &str = r#"{
    "columns": {
        "sku": [{"rule": "strip"}, {"rule": "upc_a"}, {"rule": "unique", "action": "drop_row"}],
        "name": [{"rule": "strip"}, {"rule": "capitalize_words"}],
        "price": [{"rule": "float", "action": "drop_row"}],
        "active": [{"rule": "boolean", "action": {"default": false}}]
    }
}"#;

#[test]
fn test_keyed_file_round_trip() {
    let input = create_temp_csv(
        "sku,name,price,active\n\
         42, blue widget ,1.50,yes\n\
         42,duplicate,2.00,no\n\
         7,gizmo,free,yes\n\
         8,sprocket,3,maybe\n",
    );
    let output = NamedTempFile::new().unwrap();
    let config = RulesConfig::from_json(RULES).unwrap();

    let source = CsvSource::from_path(input.path(), true).unwrap();
    let mut reader = Rigidity::new(source, config.build().unwrap());
    let headers = reader.headers().unwrap().to_vec();

    let sink = CsvSink::from_path(output.path(), Some(headers)).unwrap();
    let mut writer = Rigidity::new(sink, config.build().unwrap());
    writer.write_header().unwrap();
    let rows: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(writer.write_rows(rows).unwrap(), 2);
    writer.into_inner().flush().unwrap();

    assert_eq!(reader.stats().read, 4);
    assert_eq!(reader.stats().dropped, 2);
    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(
        written,
        "sku,name,price,active\n\
         000000000042,Blue Widget,1.5,True\n\
         000000000008,Sprocket,3.0,False\n"
    );
}

#[test]
fn test_sequence_file_with_header_skip() {
    let input = create_temp_csv("qty\n1\nx\n3\n");
    let config =
        RulesConfig::from_json(r#"{"columns": [[{"rule": "integer", "action": "zero"}]]}"#)
            .unwrap();
    let source = CsvSource::from_path(input.path(), false).unwrap();
    let mut reader = Rigidity::new(source, config.build().unwrap());
    let header = reader.skip_row().unwrap().unwrap();
    assert_eq!(header.to_string(), r#"[Str("qty")]"#);

    let values: Vec<String> = reader
        .map(|row| row.unwrap().values().map(ToString::to_string).collect())
        .collect();
    assert_eq!(values, vec!["1", "0", "3"]);
}

#[test]
fn test_missing_input_file() {
    let err = CsvSource::from_path(std::path::Path::new("/no/such/file.csv"), false).unwrap_err();
    assert!(err.to_string().starts_with("failed to open /no/such/file.csv"));
}

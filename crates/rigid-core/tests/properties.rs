//! Property tests for pipeline identity and the Bytes rule.

use proptest::prelude::*;

use rigid_core::rules::Bytes;
use rigid_core::{Pipeline, Row, RowOutcome, Rule, RuleChain, Value};

proptest! {
    #[test]
    fn empty_chains_are_identity(fields in prop::collection::vec(".*", 0..8), width in 0usize..8) {
        let rules: Vec<RuleChain> = (0..width).map(|_| Vec::new()).collect();
        let mut pipeline = Pipeline::new(rules);
        let row = Row::sequence(fields);
        prop_assert_eq!(
            pipeline.validate_read(row.clone()).unwrap(),
            RowOutcome::Accepted(row.clone())
        );
        prop_assert_eq!(
            pipeline.validate_write(row.clone()).unwrap(),
            RowOutcome::Accepted(row)
        );
    }

    #[test]
    fn utf8_bytes_round_trip(text in ".*") {
        let mut rule = Bytes::utf8();
        let encoded = rule.read(Value::from(text.as_str())).unwrap();
        prop_assert_eq!(rule.write(encoded).unwrap(), Value::from(text));
    }

    #[test]
    fn latin1_bytes_round_trip(text in "[ -~\u{a0}-\u{ff}]*") {
        let mut rule = Bytes::new("iso-8859-1").unwrap();
        let encoded = rule.read(Value::from(text.as_str())).unwrap();
        prop_assert_eq!(rule.write(encoded).unwrap(), Value::from(text));
    }
}

//! Uniqueness tracking across every row a pipeline sees.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::{Rule, UniqueAction};
use crate::value::{Value, ValueKey};

/// Pass the first occurrence of each value and reject repeats.
///
/// The seen-set lives as long as the rule, so it spans every row of the
/// owning pipeline. Cloning the rule copies the set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Unique {
    #[serde(default)]
    pub action: UniqueAction,
    #[serde(skip)]
    seen: HashSet<ValueKey>,
}

impl Unique {
    pub fn new(action: UniqueAction) -> Self {
        Self {
            action,
            seen: HashSet::new(),
        }
    }

    /// Number of distinct values seen so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

impl Rule for Unique {
    fn name(&self) -> &'static str {
        "Unique"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        if self.seen.insert(ValueKey(value.clone())) {
            return Ok(value);
        }
        match self.action {
            UniqueAction::Error => Err(RuleError::invalid(value, "duplicate value")),
            UniqueAction::DropRow => Err(RuleError::DropRow),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_unique_data() {
        let mut rule = Unique::default();
        for i in 0..10 {
            assert_eq!(rule.apply(Value::Int(i)), Ok(Value::Int(i)));
        }
        assert_eq!(rule.seen_count(), 10);
    }

    #[test]
    fn test_apply_repeat_data() {
        let mut rule = Unique::default();
        rule.apply(Value::Int(10)).unwrap();
        assert!(matches!(
            rule.apply(Value::Int(10)),
            Err(RuleError::Invalid { .. })
        ));
    }

    #[test]
    fn test_repeat_separated_by_other_values() {
        let mut rule = Unique::new(UniqueAction::DropRow);
        assert!(rule.apply(Value::from("a")).is_ok());
        assert!(rule.apply(Value::from("b")).is_ok());
        assert!(rule.apply(Value::from("c")).is_ok());
        assert_eq!(rule.apply(Value::from("a")), Err(RuleError::DropRow));
        assert!(rule.apply(Value::from("d")).is_ok());
    }

    #[test]
    fn test_clone_copies_seen_set() {
        let mut original = Unique::default();
        original.apply(Value::from("x")).unwrap();
        let mut copy = original.clone();
        copy.apply(Value::from("y")).unwrap();
        assert!(copy.apply(Value::from("x")).is_err());
        assert!(original.apply(Value::from("y")).is_ok());
    }
}

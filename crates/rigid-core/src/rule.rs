//! The rule capability contract and the policies rules act on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::value::Value;

/// A unit of validation or correction applied to one field.
///
/// `read` and `write` default to `apply`, so a rule that behaves the same in
/// both directions only implements `apply`. Rules take `&mut self` because
/// some of them (uniqueness tracking, carry-forward) keep state for the
/// lifetime of the pipeline that owns them.
pub trait Rule: fmt::Debug + Send {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Transformation shared by both directions.
    fn apply(&mut self, value: Value) -> RuleResult {
        Ok(value)
    }

    /// Transformation for data flowing from the source to the application.
    fn read(&mut self, value: Value) -> RuleResult {
        self.apply(value)
    }

    /// Transformation for data flowing from the application to the sink.
    fn write(&mut self, value: Value) -> RuleResult {
        self.apply(value)
    }

    /// Deep copy, including any accumulated state.
    fn clone_box(&self) -> Box<dyn Rule>;
}

impl Clone for Box<dyn Rule> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Direction a row travels through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    pub(crate) fn run(self, rule: &mut dyn Rule, value: Value) -> RuleResult {
        match self {
            Direction::Read => rule.read(value),
            Direction::Write => rule.write(value),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => f.write_str("read"),
            Direction::Write => f.write_str("write"),
        }
    }
}

/// Policy for values that fail numeric conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericAction {
    #[default]
    Error,
    /// Substitute `0` / `0.0`.
    Zero,
    DropRow,
}

/// Policy for repeated values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueAction {
    #[default]
    Error,
    DropRow,
}

/// Policy for values a rule cannot resolve, with a substitute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    #[default]
    Error,
    Default(Value),
    DropRow,
}

impl FallbackAction {
    /// Resolve an unmatched `value` according to the policy.
    pub fn resolve(&self, value: Value, message: &str) -> RuleResult {
        match self {
            FallbackAction::Error => Err(RuleError::invalid(value, message)),
            FallbackAction::Default(default) => Ok(default.clone()),
            FallbackAction::DropRow => Err(RuleError::DropRow),
        }
    }
}

/// Policy for values absent from a replacement table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAction {
    #[default]
    Error,
    Default(Value),
    DropRow,
    Passthrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Suffix;

    impl Rule for Suffix {
        fn name(&self) -> &'static str {
            "Suffix"
        }

        fn apply(&mut self, value: Value) -> RuleResult {
            Ok(Value::Str(format!("{value}!")))
        }

        fn clone_box(&self) -> Box<dyn Rule> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_read_and_write_default_to_apply() {
        let mut rule = Suffix;
        assert_eq!(rule.read(Value::from("a")), Ok(Value::from("a!")));
        assert_eq!(rule.write(Value::from("b")), Ok(Value::from("b!")));
    }

    #[test]
    fn test_fallback_resolve() {
        let value = Value::from("x");
        assert!(matches!(
            FallbackAction::Error.resolve(value.clone(), "bad"),
            Err(RuleError::Invalid { .. })
        ));
        assert_eq!(
            FallbackAction::Default(Value::Int(7)).resolve(value.clone(), "bad"),
            Ok(Value::Int(7))
        );
        assert_eq!(
            FallbackAction::DropRow.resolve(value, "bad"),
            Err(RuleError::DropRow)
        );
    }
}

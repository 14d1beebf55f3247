//! Boolean token parsing.

use serde::{Deserialize, Serialize};

use crate::error::RuleResult;
use crate::rule::{FallbackAction, Rule};
use crate::value::Value;

const TRUE_TOKENS: &[&str] = &["true", "yes", "t", "1"];
const FALSE_TOKENS: &[&str] = &["false", "no", "f", "0"];
const NULL_TOKENS: &[&str] = &["", "null", "none"];

/// Cast textual booleans to [`Value::Bool`].
///
/// Tokens match case-insensitively after trimming. With `allow_null`, empty
/// and `null`/`none` tokens become [`Value::Null`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Boolean {
    #[serde(default)]
    pub allow_null: bool,
    #[serde(default)]
    pub action: FallbackAction,
}

impl Boolean {
    pub fn new(allow_null: bool, action: FallbackAction) -> Self {
        Self { allow_null, action }
    }

    fn classify(&self, token: &str) -> Option<Value> {
        let lowered = token.trim().to_ascii_lowercase();
        if TRUE_TOKENS.contains(&lowered.as_str()) {
            Some(Value::Bool(true))
        } else if FALSE_TOKENS.contains(&lowered.as_str()) {
            Some(Value::Bool(false))
        } else if self.allow_null && NULL_TOKENS.contains(&lowered.as_str()) {
            Some(Value::Null)
        } else {
            None
        }
    }
}

impl Rule for Boolean {
    fn name(&self) -> &'static str {
        "Boolean"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        let matched = match &value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::Int(0) => Some(Value::Bool(false)),
            Value::Int(1) => Some(Value::Bool(true)),
            Value::Null if self.allow_null => Some(Value::Null),
            Value::Str(s) => self.classify(s),
            _ => None,
        };
        match matched {
            Some(result) => Ok(result),
            None => self.action.resolve(value, "invalid boolean"),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

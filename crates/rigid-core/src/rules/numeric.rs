//! Integer and float conversion rules.

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::{NumericAction, Rule};
use crate::value::Value;

/// Remove `_` digit separators. Each one must sit between two digits.
fn strip_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }
    let mut cleaned = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    for ch in text.chars() {
        if ch == '_' {
            match previous {
                Some(p) if p.is_ascii_digit() => {}
                _ => return None,
            }
        } else {
            if previous == Some('_') && !ch.is_ascii_digit() {
                return None;
            }
            cleaned.push(ch);
        }
        previous = Some(ch);
    }
    if previous == Some('_') {
        return None;
    }
    Some(cleaned)
}

/// Truncate toward zero, or `None` when the result does not fit an `i64`.
fn truncate_to_i64(x: f64) -> Option<i64> {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let truncated = x.trunc();
    if truncated >= -LIMIT && truncated < LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::Str(s) => Some(s),
        Value::Bytes(b) => std::str::from_utf8(b).ok(),
        _ => None,
    }
}

/// Parse an integer literal: optional sign, decimal digits, `_` separators,
/// surrounding whitespace.
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = strip_separators(digits)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}

/// Parse a float literal, including `inf` and `nan` spellings.
pub fn parse_float(text: &str) -> Option<f64> {
    let cleaned = strip_separators(text.trim())?;
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Cast values to integers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Integer {
    #[serde(default)]
    pub action: NumericAction,
}

impl Integer {
    pub fn new(action: NumericAction) -> Self {
        Self { action }
    }

    fn convert(value: &Value) -> Option<i64> {
        match value {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Float(x) => truncate_to_i64(*x),
            other => text_of(other).and_then(parse_integer),
        }
    }
}

impl Rule for Integer {
    fn name(&self) -> &'static str {
        "Integer"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        if let Some(parsed) = Self::convert(&value) {
            return Ok(Value::Int(parsed));
        }
        match self.action {
            NumericAction::Error => Err(RuleError::invalid(value, "invalid integer")),
            NumericAction::Zero => Ok(Value::Int(0)),
            NumericAction::DropRow => Err(RuleError::DropRow),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

/// Cast values to floats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Float {
    #[serde(default)]
    pub action: NumericAction,
}

impl Float {
    pub fn new(action: NumericAction) -> Self {
        Self { action }
    }

    fn convert(value: &Value) -> Option<f64> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            other => text_of(other).and_then(parse_float),
        }
    }
}

impl Rule for Float {
    fn name(&self) -> &'static str {
        "Float"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        if let Some(parsed) = Self::convert(&value) {
            return Ok(Value::Float(parsed));
        }
        match self.action {
            NumericAction::Error => Err(RuleError::invalid(value, "invalid float")),
            NumericAction::Zero => Ok(Value::Float(0.0)),
            NumericAction::DropRow => Err(RuleError::DropRow),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

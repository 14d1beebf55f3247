//! Value substitution rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::{MissingAction, Rule};
use crate::value::{Value, ValueKey};

/// Map values through a replacement table.
///
/// Values missing from the table are handled by the configured
/// [`MissingAction`]. The table can grow after construction via
/// [`ReplaceValue::insert`].
#[derive(Debug, Clone, Default)]
pub struct ReplaceValue {
    replacements: HashMap<ValueKey, Value>,
    missing: MissingAction,
}

impl ReplaceValue {
    pub fn new<I, K, V>(replacements: I, missing: MissingAction) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self {
            replacements: replacements
                .into_iter()
                .map(|(k, v)| (ValueKey(k.into()), v.into()))
                .collect(),
            missing,
        }
    }

    /// Add or overwrite a replacement, returning the previous target.
    pub fn insert(&mut self, from: impl Into<Value>, to: impl Into<Value>) -> Option<Value> {
        self.replacements.insert(ValueKey(from.into()), to.into())
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl Rule for ReplaceValue {
    fn name(&self) -> &'static str {
        "ReplaceValue"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        let key = ValueKey(value);
        if let Some(replacement) = self.replacements.get(&key) {
            return Ok(replacement.clone());
        }
        let ValueKey(value) = key;
        match &self.missing {
            MissingAction::Error => Err(RuleError::invalid(value, "no replacement for value")),
            MissingAction::Default(default) => Ok(default.clone()),
            MissingAction::DropRow => Err(RuleError::DropRow),
            MissingAction::Passthrough => Ok(value),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

/// Replace every value with a fixed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Static {
    pub value: Value,
}

impl Static {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Rule for Static {
    fn name(&self) -> &'static str {
        "Static"
    }

    fn apply(&mut self, _value: Value) -> RuleResult {
        Ok(self.value.clone())
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

/// Turn [`Value::Null`] into an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoneToEmptyString;

impl Rule for NoneToEmptyString {
    fn name(&self) -> &'static str {
        "NoneToEmptyString"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        match value {
            Value::Null => Ok(Value::Str(String::new())),
            other => Ok(other),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

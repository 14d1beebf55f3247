//! Carry the last non-empty value forward over blanks.

use serde::{Deserialize, Serialize};

use crate::error::RuleResult;
use crate::rule::{FallbackAction, Rule};
use crate::value::Value;

/// Fill empty values with the most recent non-empty value this rule saw.
///
/// An empty value before any non-empty one is resolved by `action`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cary {
    #[serde(default)]
    pub action: FallbackAction,
    #[serde(skip)]
    last: Option<Value>,
}

impl Cary {
    pub fn new(action: FallbackAction) -> Self {
        Self { action, last: None }
    }

    /// The value that would fill the next blank.
    pub fn last(&self) -> Option<&Value> {
        self.last.as_ref()
    }
}

impl Rule for Cary {
    fn name(&self) -> &'static str {
        "Cary"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        if !value.is_empty() {
            self.last = Some(value.clone());
            return Ok(value);
        }
        match &self.last {
            Some(last) => Ok(last.clone()),
            None => self.action.resolve(value, "no previous value to carry"),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

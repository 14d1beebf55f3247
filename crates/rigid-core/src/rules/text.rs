//! String clean-up rules.
//!
//! These rules never fail. Non-string values pass through unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::Rule;
use crate::value::Value;

macro_rules! clone_box {
    () => {
        fn clone_box(&self) -> Box<dyn Rule> {
            Box::new(self.clone())
        }
    };
}

fn map_str(value: Value, f: impl FnOnce(&str) -> String) -> RuleResult {
    match value {
        Value::Str(s) => Ok(Value::Str(f(&s))),
        other => Ok(other),
    }
}

/// Replace every value with an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Drop;

impl Rule for Drop {
    fn name(&self) -> &'static str {
        "Drop"
    }

    fn apply(&mut self, _value: Value) -> RuleResult {
        Ok(Value::Str(String::new()))
    }

    clone_box!();
}

/// Remove leading and trailing characters, whitespace by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Strip {
    #[serde(default)]
    pub chars: Option<String>,
}

impl Strip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chars(chars: impl Into<String>) -> Self {
        Self {
            chars: Some(chars.into()),
        }
    }
}

impl Rule for Strip {
    fn name(&self) -> &'static str {
        "Strip"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        map_str(value, |s| match &self.chars {
            Some(chars) => s.trim_matches(|c: char| chars.contains(c)).to_string(),
            None => s.trim().to_string(),
        })
    }

    clone_box!();
}

fn default_separators() -> String {
    " \t\r\n".to_string()
}

fn default_true() -> bool {
    true
}

/// Upper-case the first letter following each separator character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapitalizeWords {
    #[serde(default = "default_separators")]
    pub separators: String,
    /// Also capitalize the first character of the value.
    #[serde(default = "default_true")]
    pub cap_first: bool,
}

impl CapitalizeWords {
    pub fn new(separators: impl Into<String>, cap_first: bool) -> Self {
        Self {
            separators: separators.into(),
            cap_first,
        }
    }
}

impl Default for CapitalizeWords {
    fn default() -> Self {
        Self::new(default_separators(), true)
    }
}

impl Rule for CapitalizeWords {
    fn name(&self) -> &'static str {
        "CapitalizeWords"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        map_str(value, |s| {
            let mut out = String::with_capacity(s.len());
            let mut capitalize = self.cap_first;
            for ch in s.chars() {
                if capitalize {
                    out.extend(ch.to_uppercase());
                } else {
                    out.push(ch);
                }
                capitalize = self.separators.contains(ch);
            }
            out
        })
    }

    clone_box!();
}

/// Lower-case the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lower;

impl Rule for Lower {
    fn name(&self) -> &'static str {
        "Lower"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        map_str(value, str::to_lowercase)
    }

    clone_box!();
}

/// Upper-case the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Upper;

impl Rule for Upper {
    fn name(&self) -> &'static str {
        "Upper"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        map_str(value, str::to_uppercase)
    }

    clone_box!();
}

/// Strip leading and trailing CR/LF characters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveLinebreaks;

impl Rule for RemoveLinebreaks {
    fn name(&self) -> &'static str {
        "RemoveLinebreaks"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        map_str(value, |s| s.trim_matches(['\r', '\n']).to_string())
    }

    clone_box!();
}

/// Require the value to contain every configured substring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contains {
    pub strings: Vec<String>,
}

impl Contains {
    pub fn new<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for Contains {
    fn name(&self) -> &'static str {
        "Contains"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        let Value::Str(text) = &value else {
            return Err(RuleError::invalid(value, "expected a string"));
        };
        if let Some(missing) = self.strings.iter().find(|s| !text.contains(s.as_str())) {
            let message = format!("missing substring {missing:?}");
            return Err(RuleError::invalid(value, message));
        }
        Ok(value)
    }

    clone_box!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_apply_empty_string() {
        assert_eq!(Drop.apply(Value::from("")), Ok(Value::from("")));
    }

    #[test]
    fn test_drop_apply_plain_string() {
        assert_eq!(Drop.apply(Value::from("hello")), Ok(Value::from("")));
        assert_eq!(Drop.apply(Value::Int(4)), Ok(Value::from("")));
    }

    #[test]
    fn test_strip_default_and_custom() {
        assert_eq!(Strip::new().apply(Value::from("  a b \t")), Ok(Value::from("a b")));
        assert_eq!(Strip::chars("-*").apply(Value::from("*-x-*")), Ok(Value::from("x")));
    }

    #[test]
    fn test_capitalize_words_default() {
        let mut rule = CapitalizeWords::default();
        assert_eq!(
            rule.apply(Value::from("hello there, world")),
            Ok(Value::from("Hello There, World"))
        );
    }

    #[test]
    fn test_capitalize_words_without_first() {
        let mut rule = CapitalizeWords::new(" ", false);
        assert_eq!(
            rule.apply(Value::from("hello there")),
            Ok(Value::from("hello There"))
        );
    }

    #[test]
    fn test_capitalize_words_custom_separators() {
        let mut rule = CapitalizeWords::new("-", true);
        assert_eq!(
            rule.apply(Value::from("jean-luc picard")),
            Ok(Value::from("Jean-Luc picard"))
        );
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(Lower.apply(Value::from("AbC")), Ok(Value::from("abc")));
        assert_eq!(Upper.apply(Value::from("AbC")), Ok(Value::from("ABC")));
        assert_eq!(Upper.apply(Value::Int(1)), Ok(Value::Int(1)));
    }

    #[test]
    fn test_remove_linebreaks() {
        let mut rule = RemoveLinebreaks;
        assert_eq!(rule.apply(Value::from("\r\nab\ncd\n")), Ok(Value::from("ab\ncd")));
        assert_eq!(rule.apply(Value::from(" x ")), Ok(Value::from(" x ")));
    }

    #[test]
    fn test_contains() {
        let mut rule = Contains::new(["@", "."]);
        assert_eq!(
            rule.apply(Value::from("a@b.c")),
            Ok(Value::from("a@b.c"))
        );
        let err = rule.apply(Value::from("a@bc")).unwrap_err();
        assert_eq!(err.to_string(), r#"missing substring ".": Str("a@bc")"#);
        assert!(rule.apply(Value::Null).is_err());
    }
}

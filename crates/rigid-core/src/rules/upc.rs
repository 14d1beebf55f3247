//! UPC-A product codes.

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::Rule;
use crate::value::Value;

const UPC_A_LEN: usize = 12;

/// Check digit for the first eleven digits of a UPC-A code.
///
/// Even indices are weighted by 3, odd indices by 1; the check digit is the
/// negated sum modulo 10.
pub fn upc_a_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(UPC_A_LEN - 1)
        .enumerate()
        .map(|(idx, d)| {
            let d = u32::from(d - b'0');
            if idx % 2 == 0 { d * 3 } else { d }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Normalize a UPC-A code to twelve zero-padded digits.
///
/// In strict mode the check digit must also be correct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpcA {
    #[serde(default)]
    pub strict: bool,
}

impl UpcA {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl Rule for UpcA {
    fn name(&self) -> &'static str {
        "UpcA"
    }

    fn apply(&mut self, value: Value) -> RuleResult {
        let digits = match &value {
            Value::Str(s) => s.trim().to_string(),
            Value::Int(i) if *i >= 0 => i.to_string(),
            _ => return Err(RuleError::invalid(value, "UPC-A must be numeric")),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RuleError::invalid(value, "UPC-A must contain only digits"));
        }
        if digits.len() > UPC_A_LEN {
            return Err(RuleError::invalid(value, "UPC-A is longer than 12 digits"));
        }
        let padded = format!("{digits:0>width$}", width = UPC_A_LEN);
        if self.strict {
            let bytes = padded.as_bytes();
            let expected = upc_a_check_digit(bytes);
            if bytes[UPC_A_LEN - 1] - b'0' != expected {
                return Err(RuleError::invalid(value, "UPC-A check digit mismatch"));
            }
        }
        Ok(Value::Str(padded))
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit() {
        assert_eq!(upc_a_check_digit(b"000000000000"), 0);
        assert_eq!(upc_a_check_digit(b"03600029145"), 2);
    }

    #[test]
    fn test_strict_accepts_valid_code() {
        let mut rule = UpcA::new(true);
        assert_eq!(
            rule.apply(Value::from("000000000000")),
            Ok(Value::from("000000000000"))
        );
        assert_eq!(
            rule.apply(Value::from("036000291452")),
            Ok(Value::from("036000291452"))
        );
    }

    #[test]
    fn test_strict_rejects_bad_checksum() {
        let mut rule = UpcA::new(true);
        assert!(matches!(
            rule.apply(Value::from("000000000001")),
            Err(RuleError::Invalid { .. })
        ));
    }

    #[test]
    fn test_lenient_skips_checksum() {
        let mut rule = UpcA::new(false);
        assert_eq!(
            rule.apply(Value::from("000000000001")),
            Ok(Value::from("000000000001"))
        );
    }

    #[test]
    fn test_pads_short_codes() {
        let mut rule = UpcA::new(false);
        assert_eq!(rule.apply(Value::from("42")), Ok(Value::from("000000000042")));
        assert_eq!(rule.apply(Value::Int(7)), Ok(Value::from("000000000007")));
    }

    #[test]
    fn test_rejects_non_digits_and_long_codes() {
        for strict in [true, false] {
            let mut rule = UpcA::new(strict);
            assert!(rule.apply(Value::from("12a4")).is_err());
            assert!(rule.apply(Value::from("")).is_err());
            assert!(rule.apply(Value::from("0000000000000")).is_err());
            assert!(rule.apply(Value::Float(1.0)).is_err());
        }
    }
}

//! Conversion between text and encoded bytes.

use encoding_rs::Encoding;

use crate::config::ConfigError;
use crate::error::{RuleError, RuleResult};
use crate::rule::Rule;
use crate::value::Value;

/// Encode strings to bytes on read and decode bytes to strings on write.
///
/// Values already in the target form pass through unchanged.
#[derive(Debug, Clone)]
pub struct Bytes {
    encoding: &'static Encoding,
}

impl Bytes {
    /// Build the rule from a WHATWG encoding label such as `utf-8` or
    /// `latin1`.
    pub fn new(label: &str) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ConfigError::UnknownEncoding {
                label: label.to_string(),
            }
        })?;
        // UTF-16 and the replacement encoding have no encoder.
        if encoding.output_encoding() != encoding {
            return Err(ConfigError::UnknownEncoding {
                label: label.to_string(),
            });
        }
        Ok(Self { encoding })
    }

    pub fn utf8() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }
}

impl Default for Bytes {
    fn default() -> Self {
        Self::utf8()
    }
}

impl Rule for Bytes {
    fn name(&self) -> &'static str {
        "Bytes"
    }

    fn read(&mut self, value: Value) -> RuleResult {
        match value {
            Value::Str(text) => {
                let (encoded, _, had_errors) = self.encoding.encode(&text);
                if had_errors {
                    return Err(RuleError::invalid(
                        text,
                        format!("not encodable as {}", self.encoding.name()),
                    ));
                }
                Ok(Value::Bytes(encoded.into_owned()))
            }
            Value::Bytes(bytes) => Ok(Value::Bytes(bytes)),
            other => Err(RuleError::invalid(other, "expected a string")),
        }
    }

    fn write(&mut self, value: Value) -> RuleResult {
        match value {
            Value::Bytes(bytes) => {
                let decoded = self
                    .encoding
                    .decode_without_bom_handling_and_without_replacement(&bytes)
                    .map(std::borrow::Cow::into_owned);
                match decoded {
                    Some(text) => Ok(Value::Str(text)),
                    None => Err(RuleError::invalid(
                        bytes,
                        format!("not valid {}", self.encoding.name()),
                    )),
                }
            }
            Value::Str(text) => Ok(Value::Str(text)),
            other => Err(RuleError::invalid(other, "expected a byte sequence")),
        }
    }

    fn clone_box(&self) -> Box<dyn Rule> {
        Box::new(self.clone())
    }
}

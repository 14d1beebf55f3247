//! Row shapes and column addressing.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Identifies the column a rule chain is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Index(idx) => write!(f, "{idx}"),
            ColumnKey::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<usize> for ColumnKey {
    fn from(value: usize) -> Self {
        ColumnKey::Index(value)
    }
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        ColumnKey::Name(value.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(value: String) -> Self {
        ColumnKey::Name(value)
    }
}

/// A row as produced or accepted by a tabular collaborator.
///
/// Sequence rows are addressed by position, keyed rows by header name.
/// Keyed rows keep their field order.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Sequence(Vec<Value>),
    Keyed(IndexMap<String, Value>),
}

impl Row {
    /// Build a sequence row from anything convertible to values.
    pub fn sequence<I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Row::Sequence(fields.into_iter().map(Into::into).collect())
    }

    /// Build a keyed row from `(name, value)` pairs.
    pub fn keyed<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Row::Keyed(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Row::Sequence(fields) => fields.len(),
            Row::Keyed(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Row::Keyed(_))
    }

    /// Field addressed by `key`, if the row has it.
    ///
    /// An index key never matches a keyed row and a name key never matches a
    /// sequence row.
    pub fn get(&self, key: &ColumnKey) -> Option<&Value> {
        match (self, key) {
            (Row::Sequence(fields), ColumnKey::Index(idx)) => fields.get(*idx),
            (Row::Keyed(fields), ColumnKey::Name(name)) => fields.get(name),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &ColumnKey) -> Option<&mut Value> {
        match (self, key) {
            (Row::Sequence(fields), ColumnKey::Index(idx)) => fields.get_mut(*idx),
            (Row::Keyed(fields), ColumnKey::Name(name)) => fields.get_mut(name),
            _ => None,
        }
    }

    /// Replace the field at `key`, returning the previous value.
    pub fn set(&mut self, key: &ColumnKey, value: Value) -> Option<Value> {
        self.get_mut(key).map(|slot| std::mem::replace(slot, value))
    }

    /// Field values in row order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Row::Sequence(fields) => Box::new(fields.iter()),
            Row::Keyed(fields) => Box::new(fields.values()),
        }
    }

    /// Header names of a keyed row.
    pub fn names(&self) -> Option<Vec<&str>> {
        match self {
            Row::Sequence(_) => None,
            Row::Keyed(fields) => Some(fields.keys().map(String::as_str).collect()),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Sequence(fields) => {
                f.write_str("[")?;
                for (idx, value) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value:?}")?;
                }
                f.write_str("]")
            }
            Row::Keyed(fields) => {
                f.write_str("{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name:?}: {value:?}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_get_set() {
        let mut row = Row::sequence(["a", "b"]);
        let key = ColumnKey::Index(1);
        assert_eq!(row.get(&key), Some(&Value::from("b")));
        assert_eq!(row.set(&key, Value::Int(2)), Some(Value::from("b")));
        assert_eq!(row, Row::Sequence(vec![Value::from("a"), Value::Int(2)]));
    }

    #[test]
    fn test_keyed_preserves_order() {
        let row = Row::keyed([("z", "1"), ("a", "2")]);
        assert_eq!(row.names(), Some(vec!["z", "a"]));
    }

    #[test]
    fn test_shape_mismatch_lookup_is_none() {
        let seq = Row::sequence(["a"]);
        let keyed = Row::keyed([("0", "a")]);
        assert!(seq.get(&ColumnKey::from("0")).is_none());
        assert!(keyed.get(&ColumnKey::Index(0)).is_none());
    }

    #[test]
    fn test_display() {
        let row = Row::sequence([Value::from("a"), Value::Int(1)]);
        assert_eq!(row.to_string(), r#"[Str("a"), Int(1)]"#);
    }
}

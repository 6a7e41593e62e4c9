//! Record identifiers as they travel between the index and the record store.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The identifying value of a record.
///
/// The index often returns keys as strings while the record store uses
/// integers, so equality and hashing compare the canonical string form:
/// `RecordId::from(1) == RecordId::from("1")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Int(i64),
    /// String identifier (UUIDs, document-store ids, ...).
    Str(String),
}

impl RecordId {
    /// Reads an identifier from a JSON scalar.
    ///
    /// Returns `None` for null, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => RecordId::Int(i),
                None => RecordId::Str(n.to_string()),
            }),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            Value::Bool(b) => Some(RecordId::Str(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Reads all identifiers held by a field value, flattening arrays.
    pub fn all_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().filter_map(RecordId::from_value).collect(),
            other => RecordId::from_value(other).into_iter().collect(),
        }
    }

    /// Converts the identifier back into a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(i) => Value::from(*i),
            RecordId::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a == b,
            (RecordId::Str(a), RecordId::Str(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Str(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Str(value)
    }
}

impl PartialEq<i64> for RecordId {
    fn eq(&self, other: &i64) -> bool {
        *self == RecordId::Int(*other)
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        *self == RecordId::from(*other)
    }
}

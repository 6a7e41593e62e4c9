//! Field types and their index suffix codes.
//!
//! Every indexed field is stored under `<name>_<code>`, where the code tells
//! the backend schema how to analyze the value (`title_t`, `age_i`, ...).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

use crate::error::SchemaError;

/// The declared type of an indexed field.
///
/// Symbolic tags map to fixed codes. [`FieldType::Literal`] carries a code
/// that is used verbatim, for custom dynamic-field suffixes. Any string that
/// is not a known tag resolves to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub enum FieldType {
    /// Integer field (`i`).
    Integer,
    /// Floating point field (`f`).
    Float,
    /// Boolean field (`b`).
    Boolean,
    /// Untokenized string field (`s`).
    String,
    /// Tokenized text field (`t`).
    Text,
    /// Date field (`d`).
    Date,
    /// Range-optimized integer field (`ri`).
    RangeInteger,
    /// Range-optimized float field (`rf`).
    RangeFloat,
    /// Facet field (`facet`).
    Facet,
    /// A raw suffix code used as-is.
    Literal(String),
}

impl FieldType {
    /// Creates a literal type from a raw suffix code.
    pub fn literal(code: impl Into<String>) -> Self {
        FieldType::Literal(code.into())
    }

    /// Resolves a tag or code string. Known tags map to their variant, any
    /// other string is kept as a literal code.
    pub fn resolve(input: &str) -> Self {
        Self::from_tag(input).unwrap_or_else(|| FieldType::literal(input))
    }

    /// Returns the variant for a symbolic tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "integer" => Some(FieldType::Integer),
            "float" => Some(FieldType::Float),
            "boolean" => Some(FieldType::Boolean),
            "string" => Some(FieldType::String),
            "text" => Some(FieldType::Text),
            "date" => Some(FieldType::Date),
            "range_integer" => Some(FieldType::RangeInteger),
            "range_float" => Some(FieldType::RangeFloat),
            "facet" => Some(FieldType::Facet),
            _ => None,
        }
    }

    /// Returns the suffix code appended to field names of this type.
    pub fn code(&self) -> &str {
        match self {
            FieldType::Integer => "i",
            FieldType::Float => "f",
            FieldType::Boolean => "b",
            FieldType::String => "s",
            FieldType::Text => "t",
            FieldType::Date => "d",
            FieldType::RangeInteger => "ri",
            FieldType::RangeFloat => "rf",
            FieldType::Facet => "facet",
            FieldType::Literal(code) => code,
        }
    }

    /// Returns the symbolic tag, or `None` for literal codes.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            FieldType::Integer => Some("integer"),
            FieldType::Float => Some("float"),
            FieldType::Boolean => Some("boolean"),
            FieldType::String => Some("string"),
            FieldType::Text => Some("text"),
            FieldType::Date => Some("date"),
            FieldType::RangeInteger => Some("range_integer"),
            FieldType::RangeFloat => Some("range_float"),
            FieldType::Facet => Some("facet"),
            FieldType::Literal(_) => None,
        }
    }

    /// Returns the value written for a nil attribute of this type.
    pub fn default_value(&self) -> Value {
        default_value_for(self.code())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldType::Literal(code) if FieldType::from_tag(code).is_some() => {
                json!({ "code": code }).serialize(serializer)
            }
            FieldType::Literal(code) => serializer.serialize_str(code),
            tagged => serializer.serialize_str(tagged.tag().unwrap_or_default()),
        }
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldType::resolve(s))
    }
}

impl TryFrom<&Value> for FieldType {
    type Error = SchemaError;

    /// Reads a field type from configuration.
    ///
    /// A JSON string is resolved with [`FieldType::resolve`]. An object with a
    /// `code` key is always a literal, even when the code reads like a tag
    /// (`{"code": "string"}`). Anything else is invalid.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(input) => Ok(FieldType::resolve(input)),
            Value::Object(map) => match map.get("code") {
                Some(Value::String(code)) if map.len() == 1 => Ok(FieldType::literal(code.clone())),
                _ => Err(SchemaError::InvalidFieldType {
                    value: value.to_string(),
                }),
            },
            other => Err(SchemaError::InvalidFieldType {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<Value> for FieldType {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        FieldType::try_from(&value)
    }
}

/// Returns the value substituted for a nil attribute.
///
/// Accepts either a symbolic tag (`"float"`) or a suffix code (`"f"`).
/// Booleans default to the string `"false"`, which is what the index format
/// expects. Unknown inputs default to an empty string.
pub fn default_value_for(type_or_code: &str) -> Value {
    match type_or_code {
        "f" | "float" | "rf" | "range_float" => json!(0.0),
        "i" | "integer" | "ri" | "range_integer" => json!(0),
        "b" | "boolean" => json!("false"),
        _ => json!(""),
    }
}

//! The ordered value tree that payload templates are parsed into and
//! expanded into.
//!
//! Mirrors `serde_json::Value`, with two differences: objects keep their
//! declaration order (expansion order depends on it), and there is a
//! [`Timestamp`] scalar for values produced by `$now` / `$utcNow`.

use crate::Timestamp;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Number;

/// An object's members in declaration order.
pub type Object = IndexMap<String, SeedValue>;

/// A JSON-like value, possibly containing resolved timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeedValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Timestamp(Timestamp),
    Array(Vec<SeedValue>),
    Object(Object),
}

impl SeedValue {
    /// Parses JSON text, preserving object key order.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(json))
    }

    /// Builds an integer scalar.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Number(Number::from(value))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<SeedValue>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SeedValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Text substituted in place of a `$prop(..)` reference.
    ///
    /// `None` for null, `True`/`False` for booleans and
    /// `YYYY-MM-DD HH:MM:SS[.ffffff]` for timestamps, matching payloads
    /// written for the Python seeder. Containers render as compact JSON.
    #[must_use]
    pub fn to_prop_text(&self) -> String {
        match self {
            Self::Null => "None".to_string(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
            Self::Timestamp(ts) => ts.to_string(),
            Self::Array(_) | Self::Object(_) => self.to_json().to_string(),
        }
    }

    /// Converts to a plain JSON value. Timestamps become ISO-8601 strings.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Timestamp(ts) => serde_json::Value::String(ts.to_iso_string()),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for SeedValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for SeedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SeedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Timestamp> for SeedValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl Serialize for SeedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Timestamp(ts) => ts.serialize(serializer),
            Self::Array(items) => serializer.collect_seq(items),
            Self::Object(map) => serializer.collect_map(map),
        }
    }
}

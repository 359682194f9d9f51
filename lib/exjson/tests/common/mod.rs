//! Shared `Json64` codec for integration tests.
//!
//! A small extended-JSON dialect whose only extension is a date scalar
//! carried as epoch milliseconds. On the wire a date is a single-key
//! object (`{"$date": <ms>}` by default; the key is configurable
//! through the codec options, which lets tests observe which option
//! source reached the codec). Plain JSON serialization cannot
//! round-trip the extension: `serde::Serialize` for [`Value`] flattens
//! a date to a bare number.

use std::collections::BTreeMap;

use exjson_core::{Codec, CodecValue, Error, Result};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as Json;

/// MIME identifier of the codec.
pub const MIME_TYPE: &str = "application/json64";

/// Wire key marking a date object when no options override it.
pub const DEFAULT_DATE_KEY: &str = "$date";

/// The codec's value model: JSON plus a date scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Epoch milliseconds.
    Date(i64),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl CodecValue for Value {
    fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }
}

// Plain JSON view of the value: the date extension is lost here, which
// is exactly what a non-codec serialization path produces.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Date(ms) => serializer.serialize_i64(*ms),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Wire key to tag dates with.
    pub date_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Wire key recognized as a date tag.
    pub date_key: String,
}

pub struct Json64;

impl Codec for Json64 {
    type Value = Value;
    type StringifyOptions = StringifyOptions;
    type ParseOptions = ParseOptions;

    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn stringify(&self, value: &Value, options: Option<&StringifyOptions>) -> Result<String> {
        let key = options.map_or(DEFAULT_DATE_KEY, |o| o.date_key.as_str());
        serde_json::to_string(&to_wire(value, key)).map_err(|e| Error::stringify(e.to_string()))
    }

    fn parse(&self, text: &str, options: Option<&ParseOptions>) -> Result<Value> {
        let key = options.map_or(DEFAULT_DATE_KEY, |o| o.date_key.as_str());
        let wire: Json = serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))?;
        Ok(from_wire(wire, key))
    }
}

fn to_wire(value: &Value, date_key: &str) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(value) => Json::Bool(*value),
        Value::Number(value) => serde_json::Number::from_f64(*value).map_or(Json::Null, Json::Number),
        Value::String(value) => Json::String(value.clone()),
        Value::Date(ms) => serde_json::json!({ date_key: ms }),
        Value::Array(items) => Json::Array(items.iter().map(|v| to_wire(v, date_key)).collect()),
        Value::Object(entries) => Json::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_wire(v, date_key)))
                .collect(),
        ),
    }
}

fn from_wire(value: Json, date_key: &str) -> Value {
    match value {
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Bool(value),
        Json::Number(value) => Value::Number(value.as_f64().unwrap_or_default()),
        Json::String(value) => Value::String(value),
        Json::Array(items) => {
            Value::Array(items.into_iter().map(|v| from_wire(v, date_key)).collect())
        }
        Json::Object(map) => {
            if map.len() == 1
                && let Some(ms) = map.get(date_key).and_then(Json::as_i64)
            {
                return Value::Date(ms);
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, from_wire(v, date_key)))
                    .collect(),
            )
        }
    }
}

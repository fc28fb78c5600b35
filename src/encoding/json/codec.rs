// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON bridge for records.
//!
//! Converts between JSON objects and [`Record`] values so streams can be fed
//! from, and dumped to, JSON lines.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pbstream::encoding::json::JsonCodec;
//!
//! let json = JsonCodec::new();
//! let record = json.decode(r#"{"device": {"id": "abc"}, "apps": [1, 2]}"#)?;
//! assert!(record.contains_key("device"));
//! # Ok(())
//! # }
//! ```

use crate::{Record, Result, StreamError, Value};

/// Two-way JSON <-> record converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    _private: (),
}

impl JsonCodec {
    /// Create a new JSON codec.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Decode a JSON object into a record.
    ///
    /// # Errors
    ///
    /// Fails with `MalformedPayload` on invalid JSON and `TypeMismatch` when
    /// the top-level value is not an object.
    pub fn decode(&self, json: &str) -> Result<Record> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| StreamError::malformed("JSON", e.to_string()))?;

        match value {
            serde_json::Value::Object(obj) => Ok(obj
                .into_iter()
                .map(|(key, val)| (key, json_to_value(val)))
                .collect()),
            other => Err(StreamError::type_mismatch(
                "record",
                "object",
                json_kind(&other),
            )),
        }
    }

    /// Encode a record as a JSON string.
    pub fn encode(&self, record: &Record, pretty: bool) -> Result<String> {
        let json = serde_json::Value::Object(record_to_json(record));

        let encoded = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        encoded.map_err(|e| StreamError::malformed("JSON", e.to_string()))
    }
}

fn json_to_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt64(u)
            } else {
                // serde_json numbers are always one of i64, u64 or f64.
                Value::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(obj) => Value::Struct(
            obj.into_iter()
                .map(|(key, val)| (key, json_to_value(val)))
                .collect(),
        ),
    }
}

fn record_to_json(record: &Record) -> serde_json::Map<String, serde_json::Value> {
    record
        .iter()
        .map(|(key, val)| (key.clone(), value_to_json(val)))
        .collect()
}

fn value_to_json(value: &Value) -> serde_json::Value {
    use serde_json::{Number, Value as Json};

    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int32(i) => Json::Number(Number::from(*i)),
        Value::Int64(i) => Json::Number(Number::from(*i)),
        Value::UInt32(u) => Json::Number(Number::from(*u)),
        Value::UInt64(u) => Json::Number(Number::from(*u)),
        // Non-finite floats have no JSON representation.
        Value::Float32(f) => Number::from_f64(*f as f64).map_or(Json::Null, Json::Number),
        Value::Float64(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(arr) => Json::Array(arr.iter().map(value_to_json).collect()),
        Value::Struct(map) => Json::Object(record_to_json(map)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

//! JSON conversion for [`Value`] collections.
//!
//! Supported inputs for [`parse_json_str`]:
//! - A single JSON document of any kind: `[1, [2, 3]]`, `{"one": 1, "two": 2}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`, parsed into a list of documents
//!
//! Object keys keep their document order, so records enumerate exactly as written.
//! [`to_json`] and [`to_json_string`] go the other way.

use crate::error::{CollectionError, CollectionResult};
use crate::types::{Record, Value};

/// Parse JSON text into a [`Value`].
pub fn parse_json_str(input: &str) -> CollectionResult<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::InvalidJson {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON document.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return Ok(Value::from(v));
    }

    // Fall back to NDJSON.
    let mut documents = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
            CollectionError::InvalidJson {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        documents.push(Value::from(v));
    }
    Ok(Value::List(documents))
}

/// Render a [`Value`] as JSON.
///
/// Fails for values JSON cannot represent: functions and non-finite floats.
pub fn to_json(value: &Value) -> CollectionResult<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int64(v) => serde_json::Value::from(*v),
        Value::Float64(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .ok_or_else(|| CollectionError::InvalidJson {
                message: format!("non-finite number {v} has no json representation"),
            })?,
        Value::Utf8(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(
            items.iter().map(to_json).collect::<CollectionResult<Vec<_>>>()?,
        ),
        Value::Record(record) => {
            let mut map = serde_json::Map::with_capacity(record.len());
            for (key, v) in record.iter() {
                map.insert(key.to_string(), to_json(v)?);
            }
            serde_json::Value::Object(map)
        }
        Value::Function(_) => {
            return Err(CollectionError::InvalidJson {
                message: "functions have no json representation".to_string(),
            });
        }
    })
}

/// Render a [`Value`] as compact JSON text.
pub fn to_json_string(value: &Value) -> CollectionResult<String> {
    Ok(serde_json::to_string(&to_json(value)?)?)
}

impl From<serde_json::Value> for Value {
    /// Integers that fit in `i64` become [`Value::Int64`]; every other number becomes
    /// [`Value::Float64`].
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int64(i),
                None => n.as_f64().map_or(Value::Null, Value::Float64),
            },
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::with_capacity(map.len());
                for (k, v) in map {
                    record.insert(k, Value::from(v));
                }
                Value::Record(record)
            }
        }
    }
}

//! JSON <-> mapq Value conversion utilities
//!
//! Documents are string-keyed objects all the way down. Arrays are only
//! meaningful as the outermost container of a batch, so an array anywhere
//! inside a document is a decode error.

use thiserror::Error;

use crate::value::{Document, Value};

/// Errors raised while turning JSON into a [`Document`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed JSON text
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object
    #[error("Expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// The top-level value is not an array of documents
    #[error("Expected a JSON array of objects, got {found}")]
    NotAnArray { found: &'static str },

    /// An array appeared inside a document
    #[error("Arrays are not supported inside documents (at key '{key}')")]
    UnsupportedArray { key: String },
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn convert_number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // Without arbitrary_precision every JSON number is representable as f64
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn convert_object(
    obj: serde_json::Map<String, serde_json::Value>,
) -> Result<Document, DecodeError> {
    let mut map = Document::with_capacity(obj.len());
    for (key, v) in obj {
        let value = match v {
            serde_json::Value::Array(_) => return Err(DecodeError::UnsupportedArray { key }),
            other => json_to_value(other)?,
        };
        map.insert(key, value);
    }
    Ok(map)
}

/// Convert serde_json::Value to a mapq Value
pub fn json_to_value(v: serde_json::Value) -> Result<Value, DecodeError> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => Ok(convert_number(&n)),
        serde_json::Value::String(s) => Ok(Value::String(s)),
        serde_json::Value::Array(_) => Err(DecodeError::UnsupportedArray {
            key: "(top level)".to_string(),
        }),
        serde_json::Value::Object(obj) => convert_object(obj).map(Value::Object),
    }
}

/// Convert a JSON object to a Document
pub fn json_to_document(v: serde_json::Value) -> Result<Document, DecodeError> {
    match v {
        serde_json::Value::Object(obj) => convert_object(obj),
        other => Err(DecodeError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// Parse JSON text holding one object into a Document
pub fn document_from_str(json: &str) -> Result<Document, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    json_to_document(value)
}

/// Parse JSON text holding an array, keeping its elements undecoded
pub fn batch_from_str(json: &str) -> Result<Vec<serde_json::Value>, DecodeError> {
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Array(items) => Ok(items),
        other => Err(DecodeError::NotAnArray {
            found: json_type_name(&other),
        }),
    }
}

/// Convert a mapq Value to serde_json::Value
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

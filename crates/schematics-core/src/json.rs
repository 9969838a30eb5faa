//! JSON document helpers: parsing, merge patches and serialization
//!
//! Documents keep their key order through a round trip (serde_json is built
//! with `preserve_order`), so patching one key never reshuffles the rest.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while parsing a JSON config document
#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Syntax(#[from] serde_json::Error),

    #[error("expected an object at the document root, found {0}")]
    NotAnObject(&'static str),
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a JSON document whose root must be an object
pub fn parse_document(bytes: &[u8]) -> Result<Value, JsonError> {
    let value: Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        return Err(JsonError::NotAnObject(kind_of(&value)));
    }
    Ok(value)
}

/// Serialize with 2-space indentation and no trailing newline
pub fn to_pretty(value: &Value) -> String {
    format!("{:#}", value)
}

/// Apply a JSON merge patch (RFC 7396) in place
///
/// Objects merge key by key, `null` removes a key, anything else (arrays
/// included) replaces the target value wholesale.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_map) = target else {
        return;
    };

    for (key, value) in patch_map {
        if value.is_null() {
            target_map.shift_remove(key);
        } else {
            let slot = target_map.entry(key.clone()).or_insert(Value::Null);
            merge_patch(slot, value);
        }
    }
}

//! Snapshots of selector output
//!
//! A selector may return anything `Serialize`. Its output is structurally
//! cloned into a `serde_json::Value`, which detaches the snapshot from any
//! reactive state it was computed from, then classified:
//!
//! - falsy values (`null`, `false`, `0`, `""`) mean "no update this cycle"
//! - objects become a [`Snapshot`]
//! - anything else is rejected

use crate::error::{BindError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value state produced by one selector run
pub type Snapshot = Map<String, Value>;

/// Structurally clone a selector result
pub fn structural_clone<S: Serialize + ?Sized>(output: &S) -> Result<Value> {
    Ok(serde_json::to_value(output)?)
}

/// Falsiness in the host's sense: `null`, `false`, zero and the empty string
///
/// Non-finite floats serialize to `null` and are therefore falsy too.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Classify a cloned value: `Ok(None)` skips the cycle
pub fn into_snapshot(value: Value) -> Result<Option<Snapshot>> {
    if is_falsy(&value) {
        return Ok(None);
    }
    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(BindError::NotAMapping {
            kind: value_kind(&other),
        }),
    }
}

//! Snapshot diffing
//!
//! A patch holds every key of the next snapshot that is new or whose value
//! changed. Keys that disappeared are not represented: removals are never
//! pushed to the render sink.

use crate::snapshot::Snapshot;
use serde_json::{Map, Value};

/// Keys to push to the render sink
pub type Patch = Map<String, Value>;

/// Deep value comparison
///
/// Numbers compare by value, so `1` equals `1.0`. Object key order is
/// irrelevant.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(p), Some(q)) if p == q)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| structurally_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Compute the patch that brings `previous` up to date with `next`
pub fn diff(previous: &Snapshot, next: &Snapshot) -> Patch {
    next.iter()
        .filter(|(key, value)| {
            previous
                .get(key.as_str())
                .map_or(true, |old| !structurally_equal(old, value))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

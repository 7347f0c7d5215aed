//! Helpers for judging raw answer values.

use serde_json::Value;

/// Returns true if a value counts as an actual answer.
///
/// `null`, empty strings and empty lists do not; `false` and `0` do.
pub fn is_answer(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Returns true if a value is truthy.
///
/// Booleans are themselves, numbers are truthy when non-zero, strings and
/// collections when non-empty, `null` never.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Flatten nested lists into a single list. Non-list values are returned unchanged.
///
/// Checkbox prompters may group selections; the stored answer is always one flat list.
pub fn flatten(value: Value) -> Value {
    fn collect(value: Value, out: &mut Vec<Value>) {
        match value {
            Value::Array(items) => {
                for item in items {
                    collect(item, out);
                }
            }
            other => out.push(other),
        }
    }

    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                collect(item, &mut out);
            }
            Value::Array(out)
        }
        other => other,
    }
}

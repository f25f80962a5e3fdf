//! Null-tolerant traversal of untyped JSON.

use serde_json::Value;

/// Follows `path` through nested objects. A missing key, a non-object
/// intermediate, or a JSON `null` at the end all resolve to `None`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let found = path
        .iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))?;
    if found.is_null() { None } else { Some(found) }
}

/// Like [`lookup`], rendering the found value as text. Strings are returned
/// verbatim, other scalars through their JSON text, and arrays or objects as
/// compact JSON. Empty arrays and objects carry nothing and are absent.
pub fn lookup_text(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path)
        .filter(|found| !is_empty_container(found))
        .map(render_text)
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

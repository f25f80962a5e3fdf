use crate::error::RequestError;
use crate::path::lookup;
use crate::types::{EnvelopeShape, ResolvedHits};
use serde_json::Value;
use tracing::{debug, warn};

const NESTED_HITS_PATH: &[&str] = &["result", "input", "payload", "hits", "hits"];

type Rule = fn(&Value) -> Option<Vec<Value>>;

/// Alert envelope rules in priority order. The first rule that returns
/// `Some` decides the shape, even when its hit list is empty.
const ALERT_RULES: &[(EnvelopeShape, Rule)] = &[
    (EnvelopeShape::NestedWrapped, nested_wrapped_hits),
    (EnvelopeShape::FlatHitsArray, flat_hits),
    (EnvelopeShape::BareHitsArray, bare_hits),
];

fn nested_wrapped_hits(doc: &Value) -> Option<Vec<Value>> {
    doc.get("result")?;
    match lookup(doc, NESTED_HITS_PATH) {
        Some(Value::Array(hits)) if !hits.is_empty() => Some(hits.clone()),
        _ => None,
    }
}

fn flat_hits(doc: &Value) -> Option<Vec<Value>> {
    match doc.get("hits")? {
        Value::Array(hits) => Some(hits.clone()),
        other => {
            warn!(kind = json_kind(other), "top-level hits is not a list, ignoring");
            None
        }
    }
}

fn bare_hits(doc: &Value) -> Option<Vec<Value>> {
    doc.as_array().cloned()
}

/// Locates the alert hits inside `doc`. An empty result means no known
/// envelope produced any hits.
pub fn resolve_alerts(doc: &Value) -> ResolvedHits {
    for (shape, rule) in ALERT_RULES {
        if let Some(hits) = rule(doc) {
            debug!(%shape, hits = hits.len(), "resolved alert envelope");
            return ResolvedHits {
                shape: Some(*shape),
                hits,
            };
        }
    }
    ResolvedHits::none()
}

/// Telemetry bodies are either one object or an array of objects. Any other
/// shape, including an array with a non-object element, is rejected whole.
pub fn resolve_telemetry(doc: Value) -> Result<ResolvedHits, RequestError> {
    let hits = match doc {
        Value::Object(_) => vec![doc],
        Value::Array(items) => {
            if let Some(stray) = items.iter().find(|item| !item.is_object()) {
                warn!(kind = json_kind(stray), "telemetry array holds a non-object");
                return Err(RequestError::InvalidFormat);
            }
            items
        }
        _ => return Err(RequestError::InvalidFormat),
    };
    Ok(ResolvedHits {
        shape: Some(EnvelopeShape::SingleObjectOrArray),
        hits,
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

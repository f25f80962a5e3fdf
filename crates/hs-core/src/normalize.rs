use crate::path::{lookup, lookup_text, render_text};
use crate::types::{AlertDraft, DEFAULT_SEVERITY, EnvelopeShape, HitShape, TelemetryDraft};
use serde_json::Value;

const NESTED_TIMESTAMP: &[&str] = &["_source", "@timestamp"];
const NESTED_RULE_NAME: &[&str] = &["_source", "rule", "name"];
const NESTED_HOST_IP: &[&str] = &[
    "_source",
    "event_data",
    "metadata",
    "input",
    "beats",
    "host",
    "ip",
];
const NESTED_SIGMA_LEVEL: &[&str] = &["_source", "sigma_level"];

/// Picks the layout of one hit. Lists may mix layouts, so this runs per
/// element and only falls back to the envelope's default when the hit
/// carries neither marker key.
pub fn sniff_hit_shape(hit: &Value, envelope: EnvelopeShape) -> HitShape {
    if hit.get("_source").is_some() {
        HitShape::Nested
    } else if hit.get("timestamp").is_some() {
        HitShape::Flat
    } else {
        envelope.default_hit_shape()
    }
}

pub fn normalize_alert(hit: &Value, shape: HitShape) -> AlertDraft {
    match shape {
        HitShape::Nested => normalize_nested(hit),
        HitShape::Flat => normalize_flat(hit),
    }
}

fn normalize_nested(hit: &Value) -> AlertDraft {
    AlertDraft {
        timestamp: lookup_text(hit, NESTED_TIMESTAMP),
        alert_name: lookup_text(hit, NESTED_RULE_NAME),
        source_ip: lookup_text(hit, NESTED_HOST_IP),
        severity: severity_or_default(lookup_text(hit, NESTED_SIGMA_LEVEL)),
    }
}

fn normalize_flat(hit: &Value) -> AlertDraft {
    AlertDraft {
        timestamp: lookup_text(hit, &["timestamp"]),
        alert_name: lookup_text(hit, &["rule_name"]),
        source_ip: lookup_text(hit, &["source_ip"]),
        severity: severity_or_default(lookup_text(hit, &["severity"])),
    }
}

fn severity_or_default(value: Option<String>) -> String {
    value.unwrap_or_else(|| DEFAULT_SEVERITY.to_string())
}

/// Direct key mapping. A field of the wrong JSON type counts as absent.
pub fn normalize_telemetry(raw: &Value) -> TelemetryDraft {
    TelemetryDraft {
        button_toggle: lookup(raw, &["button_toggle"]).and_then(Value::as_bool),
        event_time: lookup(raw, &["event_time"]).and_then(|value| match value {
            Value::String(_) | Value::Number(_) => Some(render_text(value)),
            _ => None,
        }),
        light: lookup(raw, &["light"]).and_then(Value::as_f64),
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryDraft {
    pub button_toggle: Option<bool>,
    pub event_time: Option<String>,
    pub light: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub button_toggle: bool,
    pub event_time: String,
    pub light: f64,
}

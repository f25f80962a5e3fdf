use serde::{Deserialize, Serialize};

pub const DEFAULT_SEVERITY: &str = "unknown";

/// Alert fields as extracted from a hit, before completeness checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertDraft {
    pub timestamp: Option<String>,
    pub alert_name: Option<String>,
    pub source_ip: Option<String>,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp: String,
    pub alert_name: String,
    pub source_ip: String,
    pub severity: String,
}

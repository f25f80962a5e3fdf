use crate::error::IncompleteRecord;
use crate::types::{AlertDraft, AlertRecord, TelemetryDraft, TelemetryRecord};

fn required_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

pub fn validate_alert(draft: AlertDraft) -> Result<AlertRecord, IncompleteRecord<AlertDraft>> {
    let timestamp = required_text(draft.timestamp.clone());
    let alert_name = required_text(draft.alert_name.clone());
    let source_ip = required_text(draft.source_ip.clone());

    match (timestamp, alert_name, source_ip) {
        (Some(timestamp), Some(alert_name), Some(source_ip)) => Ok(AlertRecord {
            timestamp,
            alert_name,
            source_ip,
            severity: draft.severity,
        }),
        (timestamp, alert_name, source_ip) => {
            let missing = [
                ("timestamp", timestamp.is_none()),
                ("alert_name", alert_name.is_none()),
                ("source_ip", source_ip.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(IncompleteRecord {
                missing,
                record: draft,
            })
        }
    }
}

/// Presence check only: `false` and `0` are valid readings.
pub fn validate_telemetry(
    draft: TelemetryDraft,
) -> Result<TelemetryRecord, IncompleteRecord<TelemetryDraft>> {
    match (&draft.button_toggle, &draft.event_time, &draft.light) {
        (Some(button_toggle), Some(event_time), Some(light)) => Ok(TelemetryRecord {
            button_toggle: *button_toggle,
            event_time: event_time.clone(),
            light: *light,
        }),
        _ => {
            let missing = [
                ("button_toggle", draft.button_toggle.is_none()),
                ("event_time", draft.event_time.is_none()),
                ("light", draft.light.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(IncompleteRecord {
                missing,
                record: draft,
            })
        }
    }
}

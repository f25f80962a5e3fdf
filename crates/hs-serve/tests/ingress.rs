use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use hs_core::Settings;
use hs_core::alerts::AlertRepository;
use hs_core::config::DbSettings;
use hs_core::store::Store;
use hs_core::telemetry::TelemetryRepository;
use hs_core::types::{AlertRecord, TelemetryRecord};
use hs_db::{DbStore, schema};
use hs_serve::AppState;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct Harness {
    _dir: TempDir,
    settings: Settings,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            db: DbSettings {
                host: dir.path().display().to_string(),
                ..DbSettings::default()
            },
            ..Settings::default()
        };
        drop(schema::connect_and_bootstrap(&settings.db, &settings.tables).unwrap());
        Self {
            _dir: dir,
            settings,
        }
    }

    fn app(&self) -> Router {
        hs_serve::app(AppState::new(self.settings.clone()))
    }

    fn store(&self) -> DbStore {
        DbStore::connect(&self.settings.db, self.settings.tables.clone()).unwrap()
    }

    fn alerts(&self) -> Vec<AlertRecord> {
        self.store().alerts().list().unwrap()
    }

    fn telemetry(&self) -> Vec<TelemetryRecord> {
        self.store().telemetry().list().unwrap()
    }

    async fn post(&self, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap();
        let response = self.app().oneshot(request).await.unwrap();
        let status = response.status();
        assert!(response.headers().contains_key("x-correlation-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(&self, path: &str, doc: &Value) -> (StatusCode, Value) {
        self.post(path, doc.to_string()).await
    }
}

fn siem_hit(rule: &str, ip: &str) -> Value {
    json!({
        "_id": "abc",
        "_source": {
            "@timestamp": "2024-03-01T12:00:00Z",
            "rule": {"name": rule},
            "sigma_level": "high",
            "event_data": {"metadata": {"input": {"beats": {"host": {"ip": ip}}}}}
        }
    })
}

fn nested_envelope(hits: Vec<Value>) -> Value {
    json!({"result": {"input": {"payload": {"hits": {"total": hits.len(), "hits": hits}}}}})
}

fn flat_hit(rule: &str, ip: Option<&str>) -> Value {
    let mut hit = json!({"timestamp": "2024-01-01T00:00:00Z", "rule_name": rule});
    if let Some(ip) = ip {
        hit["source_ip"] = json!(ip);
    }
    hit
}

#[tokio::test]
async fn nested_envelope_persists_every_hit() {
    let harness = Harness::new();
    let hits = vec![
        siem_hit("Mimikatz", "10.0.0.1"),
        siem_hit("Lateral Movement", "10.0.0.2"),
        siem_hit("Beaconing", "10.0.0.3"),
    ];
    let (status, body) = harness
        .post_json("/post-alert", &nested_envelope(hits))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alerts processed successfully");
    assert_eq!(body["inserted"], 3);
    let stored = harness.alerts();
    assert_eq!(stored.len(), 3);
    assert_eq!(
        stored[1],
        AlertRecord {
            timestamp: "2024-03-01T12:00:00Z".to_string(),
            alert_name: "Lateral Movement".to_string(),
            source_ip: "10.0.0.2".to_string(),
            severity: "high".to_string(),
        }
    );
}

#[tokio::test]
async fn flat_hit_without_severity_defaults_to_unknown() {
    let harness = Harness::new();
    let doc = json!({"hits": [{
        "timestamp": "2024-01-01T00:00:00Z",
        "rule_name": "Brute Force",
        "source_ip": "10.0.0.5"
    }]});
    let (status, _) = harness.post_json("/post-alert", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        harness.alerts(),
        vec![AlertRecord {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            alert_name: "Brute Force".to_string(),
            source_ip: "10.0.0.5".to_string(),
            severity: "unknown".to_string(),
        }]
    );
}

#[tokio::test]
async fn bare_array_of_hits_is_accepted() {
    let harness = Harness::new();
    let doc = json!([
        siem_hit("Bare Nested", "10.1.1.1"),
        flat_hit("Bare Flat", Some("10.1.1.2"))
    ]);
    let (status, body) = harness.post_json("/post-alert", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 2);
    let stored = harness.alerts();
    assert_eq!(stored[0].alert_name, "Bare Nested");
    assert_eq!(stored[0].severity, "high");
    assert_eq!(stored[1].source_ip, "10.1.1.2");
}

#[tokio::test]
async fn empty_list_or_object_fields_are_skipped() {
    let harness = Harness::new();
    let doc = json!({"hits": [
        {"timestamp": "t", "rule_name": "r", "source_ip": []},
        {"timestamp": "t", "rule_name": {}, "source_ip": "1.1.1.1"}
    ]});
    let (status, body) = harness.post_json("/post-alert", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 0);
    assert_eq!(body["skipped"], 2);
    assert!(harness.alerts().is_empty());
}

#[tokio::test]
async fn empty_object_is_rejected_without_rows() {
    let harness = Harness::new();
    let (status, body) = harness.post_json("/post-alert", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "No JSON payload received"}));
    assert!(harness.alerts().is_empty());
}

#[tokio::test]
async fn missing_body_is_rejected() {
    let harness = Harness::new();
    let (status, body) = harness.post("/post-alert", Body::empty()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No JSON payload received");
}

#[tokio::test]
async fn non_list_hits_means_no_alerts() {
    let harness = Harness::new();
    let (status, body) = harness
        .post_json("/post-alert", &json!({"hits": {"total": 0}}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "No alerts found in payload"}));
    assert!(harness.alerts().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let harness = Harness::new();
    let (status, body) = harness.post("/post-alert", "{\"hits\": [").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Malformed JSON payload")
    );
}

#[tokio::test]
async fn hit_missing_source_ip_is_skipped() {
    let harness = Harness::new();
    let doc = json!({"hits": [
        flat_hit("one", Some("10.0.0.1")),
        flat_hit("two", None),
        flat_hit("three", Some("10.0.0.3")),
    ]});
    let (status, body) = harness.post_json("/post-alert", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 2);
    assert_eq!(body["skipped"], 1);
    let names: Vec<_> = harness
        .alerts()
        .into_iter()
        .map(|record| record.alert_name)
        .collect();
    assert_eq!(names, vec!["one", "three"]);
}

#[tokio::test]
async fn all_hits_incomplete_still_returns_ok() {
    let harness = Harness::new();
    let doc = json!({"hits": [flat_hit("one", None), flat_hit("two", None)]});
    let (status, body) = harness.post_json("/post-alert", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 0);
    assert_eq!(body["skipped"], 2);
    assert!(harness.alerts().is_empty());
}

#[tokio::test]
async fn resubmitting_a_payload_duplicates_rows() {
    let harness = Harness::new();
    let doc = nested_envelope(vec![siem_hit("Replay", "10.9.9.9")]);
    for _ in 0..2 {
        let (status, _) = harness.post_json("/post-alert", &doc).await;
        assert_eq!(status, StatusCode::OK);
    }
    let stored = harness.alerts();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], stored[1]);
}

#[tokio::test]
async fn storage_failure_mid_batch_persists_nothing() {
    let harness = Harness::new();
    harness
        .store()
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_third BEFORE INSERT ON soalerts
             WHEN NEW.alert_name = 'r3'
             BEGIN SELECT RAISE(ABORT, 'disk quota exceeded'); END;",
        )
        .unwrap();
    let hits = (1..=5)
        .map(|i| flat_hit(&format!("r{i}"), Some("10.0.0.1")))
        .collect::<Vec<_>>();
    let (status, body) = harness
        .post_json("/post-alert", &json!({ "hits": hits }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("disk quota exceeded")
    );
    assert!(harness.alerts().is_empty());
}

#[tokio::test]
async fn unreachable_database_is_a_server_error() {
    let harness = Harness::new();
    let mut settings = harness.settings.clone();
    settings.db.host = "/nonexistent/hooksink".to_string();
    let app = hs_serve::app(AppState::new(settings));

    let request = Request::builder()
        .uri("/post-alert")
        .method("POST")
        .body(Body::from(json!({"hits": [flat_hit("x", Some("1.1.1.1"))]}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("connection failed")
    );
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let harness = Harness::new();
    let request = Request::builder()
        .uri("/post-alert")
        .method("POST")
        .header("x-correlation-id", "siem-run-42")
        .body(Body::from("{}"))
        .unwrap();
    let response = harness.app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-correlation-id"], "siem-run-42");
}

#[tokio::test]
async fn telemetry_falsy_reading_is_stored() {
    let harness = Harness::new();
    let doc = json!({"button_toggle": false, "event_time": "t1", "light": 0});
    let (status, body) = harness.post_json("/post-trial", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Records processed successfully");
    assert_eq!(
        harness.telemetry(),
        vec![TelemetryRecord {
            button_toggle: false,
            event_time: "t1".to_string(),
            light: 0.0,
        }]
    );
}

#[tokio::test]
async fn telemetry_array_is_stored_in_order() {
    let harness = Harness::new();
    let doc = json!([
        {"button_toggle": true, "event_time": "t1", "light": 310.5},
        {"button_toggle": false, "event_time": "t2"},
        {"button_toggle": false, "event_time": "t3", "light": 12}
    ]);
    let (status, body) = harness.post_json("/post-trial", &doc).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 2);
    assert_eq!(body["skipped"], 1);
    let times: Vec<_> = harness
        .telemetry()
        .into_iter()
        .map(|record| record.event_time)
        .collect();
    assert_eq!(times, vec!["t1", "t3"]);
}

#[tokio::test]
async fn telemetry_scalar_body_is_invalid_format() {
    let harness = Harness::new();
    let (status, body) = harness.post_json("/post-trial", &json!("on")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Invalid JSON format, expecting object or array of objects"})
    );
    assert!(harness.telemetry().is_empty());
}

#[tokio::test]
async fn telemetry_array_of_scalars_is_invalid_format() {
    let harness = Harness::new();
    let (status, body) = harness
        .post_json("/post-trial", &json!([1, "x", true]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Invalid JSON format, expecting object or array of objects"})
    );
    assert!(harness.telemetry().is_empty());
}

#[tokio::test]
async fn telemetry_storage_failure_persists_nothing() {
    let harness = Harness::new();
    harness
        .store()
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_t2 BEFORE INSERT ON telemetry
             WHEN NEW.event_time = 't2'
             BEGIN SELECT RAISE(ABORT, 'sensor table locked'); END;",
        )
        .unwrap();
    let doc = json!([
        {"button_toggle": true, "event_time": "t1", "light": 1},
        {"button_toggle": false, "event_time": "t2", "light": 2},
        {"button_toggle": true, "event_time": "t3", "light": 3}
    ]);
    let (status, body) = harness.post_json("/post-trial", &doc).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("sensor table locked")
    );
    assert!(harness.telemetry().is_empty());
}

#[tokio::test]
async fn telemetry_empty_body_is_rejected() {
    let harness = Harness::new();
    let (status, body) = harness.post("/post-trial", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No JSON payload received");
}

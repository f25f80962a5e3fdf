use crate::alerts::AlertRepository;
use crate::error::{IncompleteRecord, IngestError, RequestError};
use crate::normalize::{normalize_alert, normalize_telemetry, sniff_hit_shape};
use crate::resolve::{resolve_alerts, resolve_telemetry};
use crate::store::Store;
use crate::telemetry::TelemetryRepository;
use crate::types::{AlertRecord, Batch, EnvelopeShape, IngestSummary, TelemetryRecord};
use crate::validation::{validate_alert, validate_telemetry};
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub correlation_id: Option<String>,
}

impl RequestContext {
    pub fn new(correlation_id: Option<String>) -> Self {
        Self { correlation_id }
    }

    fn id(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or("-")
    }
}

/// Parses a request body. Absent bodies and JSON values that carry nothing
/// (`null`, `false`, `0`, `""`, `{}`, `[]`) are all reported as an empty
/// payload.
pub fn parse_payload(body: &[u8]) -> Result<Value, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::EmptyPayload);
    }
    let doc: Value = serde_json::from_slice(body).map_err(|err| RequestError::Malformed {
        message: err.to_string(),
    })?;
    if is_blank(&doc) {
        return Err(RequestError::EmptyPayload);
    }
    Ok(doc)
}

fn is_blank(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Resolves, normalizes and validates an alert body into a batch.
pub fn prepare_alerts(body: &[u8]) -> Result<Batch<AlertRecord>, RequestError> {
    let doc = parse_payload(body)?;
    debug!(payload = %doc, "received alert payload");
    let resolved = resolve_alerts(&doc);
    let shape = match resolved.shape {
        Some(shape) if !resolved.is_empty() => shape,
        _ => return Err(RequestError::NoAlerts),
    };
    info!(%shape, hits = resolved.hits.len(), "alert payload resolved");
    Ok(build_batch("alert", &resolved.hits, |hit| {
        validate_alert(normalize_alert(hit, sniff_hit_shape(hit, shape)))
    }))
}

/// Resolves, normalizes and validates a telemetry body into a batch.
pub fn prepare_telemetry(body: &[u8]) -> Result<Batch<TelemetryRecord>, RequestError> {
    let doc = parse_payload(body)?;
    debug!(payload = %doc, "received telemetry payload");
    let resolved = resolve_telemetry(doc)?;
    info!(
        shape = %EnvelopeShape::SingleObjectOrArray,
        records = resolved.hits.len(),
        "telemetry payload resolved"
    );
    Ok(build_batch("telemetry", &resolved.hits, |raw| {
        validate_telemetry(normalize_telemetry(raw))
    }))
}

fn build_batch<R, D, F>(kind: &str, raw: &[Value], mut convert: F) -> Batch<R>
where
    D: fmt::Debug,
    F: FnMut(&Value) -> Result<R, IncompleteRecord<D>>,
{
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;
    for (index, item) in raw.iter().enumerate() {
        match convert(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(kind, index, record = ?err.record, "skipping incomplete record: {err}");
                skipped += 1;
            }
        }
    }
    Batch { records, skipped }
}

pub struct Ingestor<S: Store> {
    store: S,
}

impl<S: Store> Ingestor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn alerts(&self) -> AlertsApi<'_, S> {
        AlertsApi { core: self }
    }

    pub fn telemetry(&self) -> TelemetryApi<'_, S> {
        TelemetryApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct AlertsApi<'a, S: Store> {
    core: &'a Ingestor<S>,
}

impl<S: Store> AlertsApi<'_, S> {
    /// Inserts every record in one transaction. Nothing is kept if any
    /// insert or the commit fails.
    pub fn persist(
        &self,
        ctx: &RequestContext,
        batch: Batch<AlertRecord>,
    ) -> Result<IngestSummary, IngestError> {
        let inserted = self
            .core
            .store
            .with_tx(|store| {
                let repo = store.alerts();
                for record in &batch.records {
                    repo.insert(record)?;
                }
                Ok(batch.len())
            })
            .inspect_err(|err| {
                error!(correlation_id = ctx.id(), "alert batch discarded: {err}");
            })?;
        info!(
            correlation_id = ctx.id(),
            inserted,
            skipped = batch.skipped,
            "alert batch committed"
        );
        Ok(IngestSummary {
            inserted,
            skipped: batch.skipped,
        })
    }
}

pub struct TelemetryApi<'a, S: Store> {
    core: &'a Ingestor<S>,
}

impl<S: Store> TelemetryApi<'_, S> {
    pub fn persist(
        &self,
        ctx: &RequestContext,
        batch: Batch<TelemetryRecord>,
    ) -> Result<IngestSummary, IngestError> {
        let inserted = self
            .core
            .store
            .with_tx(|store| {
                let repo = store.telemetry();
                for record in &batch.records {
                    repo.insert(record)?;
                }
                Ok(batch.len())
            })
            .inspect_err(|err| {
                error!(correlation_id = ctx.id(), "telemetry batch discarded: {err}");
            })?;
        info!(
            correlation_id = ctx.id(),
            inserted,
            skipped = batch.skipped,
            "telemetry batch committed"
        );
        Ok(IngestSummary {
            inserted,
            skipped: batch.skipped,
        })
    }
}

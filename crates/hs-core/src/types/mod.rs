pub mod alert;
pub mod envelope;
pub mod table;
pub mod telemetry;

pub use alert::{AlertDraft, AlertRecord, DEFAULT_SEVERITY};
pub use envelope::{EnvelopeShape, HitShape, ResolvedHits};
pub use table::TableName;
pub use telemetry::{TelemetryDraft, TelemetryRecord};

/// Canonical records derived from one request, in resolved order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<R> {
    pub records: Vec<R>,
    pub skipped: usize,
}

impl<R> Batch<R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub inserted: usize,
    pub skipped: usize,
}

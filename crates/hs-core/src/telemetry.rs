use crate::error::StoreError;
use crate::types::TelemetryRecord;

pub trait TelemetryRepository {
    fn insert(&self, record: &TelemetryRecord) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<TelemetryRecord>, StoreError>;
}

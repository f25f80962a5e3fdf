use crate::alerts::AlertRepository;
use crate::error::StoreError;
use crate::telemetry::TelemetryRepository;

/// A single open connection to the destination database.
pub trait Store {
    type Alerts<'a>: AlertRepository
    where
        Self: 'a;
    type Telemetry<'a>: TelemetryRepository
    where
        Self: 'a;

    fn alerts(&self) -> Self::Alerts<'_>;
    fn telemetry(&self) -> Self::Telemetry<'_>;

    /// Runs `f` inside one transaction. Commits when `f` succeeds and rolls
    /// back otherwise; the error from `f` is returned unchanged.
    fn with_tx<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Self) -> Result<T, StoreError>;
}

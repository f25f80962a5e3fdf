pub mod alert_repo;
pub mod schema;
pub mod store;
pub mod telemetry_repo;

pub use crate::store::DbStore;

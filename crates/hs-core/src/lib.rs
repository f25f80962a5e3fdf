pub mod alerts;
pub mod config;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod path;
pub mod resolve;
pub mod store;
pub mod telemetry;
pub mod validation;

pub mod types;

pub use crate::config::Settings;
pub use crate::error::{IngestError, RequestError, StoreError};
pub use crate::ingest::{Ingestor, RequestContext};
pub use crate::store::Store;

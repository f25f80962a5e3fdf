use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("No JSON payload received")]
    EmptyPayload,
    #[error("Malformed JSON payload: {message}")]
    Malformed { message: String },
    #[error("No alerts found in payload")]
    NoAlerts,
    #[error("Invalid JSON format, expecting object or array of objects")]
    InvalidFormat,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection failed: {message}")]
    Connection { message: String },
    #[error("schema setup failed: {message}")]
    Schema { message: String },
    #[error("could not start transaction: {message}")]
    Begin { message: String },
    #[error("insert failed: {message}")]
    Insert { message: String },
    #[error("commit failed: {message}")]
    Commit { message: String },
    #[error("query failed: {message}")]
    Query { message: String },
}

/// A record that failed completeness checks. The draft is kept so the
/// skip can be logged with the offending values.
#[derive(Debug, Error)]
#[error("record missing required fields: {}", .missing.join(", "))]
pub struct IncompleteRecord<R: fmt::Debug> {
    pub missing: Vec<&'static str>,
    pub record: R,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("invalid table name: {name:?}")]
    InvalidTableName { name: String },
    #[error("config file not found: {path}")]
    MissingFile { path: String },
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        ConfigError::Figment(Box::new(value))
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error: {message}")]
    Internal { message: String },
}

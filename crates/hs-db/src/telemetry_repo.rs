use hs_core::error::StoreError;
use hs_core::telemetry::TelemetryRepository;
use hs_core::types::{TableName, TelemetryRecord};
use rusqlite::Connection;

pub struct TelemetryRepo<'a> {
    pub conn: &'a Connection,
    pub table: &'a TableName,
}

impl<'a> TelemetryRepo<'a> {
    pub fn new(conn: &'a Connection, table: &'a TableName) -> Self {
        Self { conn, table }
    }
}

impl TelemetryRepository for TelemetryRepo<'_> {
    fn insert(&self, record: &TelemetryRecord) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (button_toggle, event_time, light) VALUES (?1, ?2, ?3)",
            self.table
        );
        let mut stmt = self
            .conn
            .prepare_cached(&sql)
            .map_err(|err| StoreError::Insert {
                message: err.to_string(),
            })?;
        stmt.execute((record.button_toggle, record.event_time.as_str(), record.light))
            .map_err(|err| StoreError::Insert {
                message: err.to_string(),
            })?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<TelemetryRecord>, StoreError> {
        let sql = format!(
            "SELECT button_toggle, event_time, light FROM {} ORDER BY id ASC",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|err| StoreError::Query {
            message: err.to_string(),
        })?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TelemetryRecord {
                    button_toggle: row.get(0)?,
                    event_time: row.get(1)?,
                    light: row.get(2)?,
                })
            })
            .map_err(|err| StoreError::Query {
                message: err.to_string(),
            })?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Query {
                message: err.to_string(),
            })
    }
}

use hs_core::alerts::AlertRepository;
use hs_core::error::StoreError;
use hs_core::types::{AlertRecord, TableName};
use rusqlite::Connection;

pub struct AlertRepo<'a> {
    pub conn: &'a Connection,
    pub table: &'a TableName,
}

impl<'a> AlertRepo<'a> {
    pub fn new(conn: &'a Connection, table: &'a TableName) -> Self {
        Self { conn, table }
    }
}

impl AlertRepository for AlertRepo<'_> {
    fn insert(&self, record: &AlertRecord) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (timestamp, alert_name, source_ip, severity) VALUES (?1, ?2, ?3, ?4)",
            self.table
        );
        let mut stmt = self
            .conn
            .prepare_cached(&sql)
            .map_err(|err| StoreError::Insert {
                message: err.to_string(),
            })?;
        let params = (
            record.timestamp.as_str(),
            record.alert_name.as_str(),
            record.source_ip.as_str(),
            record.severity.as_str(),
        );
        stmt.execute(params).map_err(|err| StoreError::Insert {
            message: err.to_string(),
        })?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<AlertRecord>, StoreError> {
        let sql = format!(
            "SELECT timestamp, alert_name, source_ip, severity FROM {} ORDER BY id ASC",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|err| StoreError::Query {
            message: err.to_string(),
        })?;
        let rows = stmt
            .query_map([], map_alert_row)
            .map_err(|err| StoreError::Query {
                message: err.to_string(),
            })?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Query {
                message: err.to_string(),
            })
    }
}

fn map_alert_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AlertRecord> {
    Ok(AlertRecord {
        timestamp: row.get(0)?,
        alert_name: row.get(1)?,
        source_ip: row.get(2)?,
        severity: row.get(3)?,
    })
}

use hs_core::config::{DbSettings, Tables};
use hs_core::error::StoreError;
use rusqlite::{Connection, Result};
use std::path::Path;
use tracing::{debug, info};

const TABLES_SQL: &str = include_str!("../sql/tables.sql");

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    Ok(conn)
}

/// Opens the database described by `settings`. SQLite has no accounts, so
/// the user only appears in the connection log and the password is unused.
pub fn connect(settings: &DbSettings) -> Result<Connection, StoreError> {
    let path = settings.database_path();
    debug!(user = %settings.user, path = %path.display(), "opening database connection");
    open(&path).map_err(|err| StoreError::Connection {
        message: err.to_string(),
    })
}

/// Creates the destination tables when they do not exist yet. Existing
/// tables are left untouched.
pub fn bootstrap(conn: &Connection, tables: &Tables) -> Result<(), StoreError> {
    let sql = TABLES_SQL
        .replace("{alerts}", tables.alerts.as_str())
        .replace("{telemetry}", tables.telemetry.as_str());
    conn.execute_batch(&sql).map_err(|err| StoreError::Schema {
        message: err.to_string(),
    })?;
    info!(alerts = %tables.alerts, telemetry = %tables.telemetry, "destination tables ready");
    Ok(())
}

pub fn connect_and_bootstrap(
    settings: &DbSettings,
    tables: &Tables,
) -> Result<Connection, StoreError> {
    let conn = connect(settings)?;
    bootstrap(&conn, tables)?;
    Ok(conn)
}

pub fn with_test_db(tables: &Tables) -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory().map_err(|err| StoreError::Connection {
        message: err.to_string(),
    })?;
    bootstrap(&conn, tables)?;
    Ok(conn)
}

use crate::alert_repo::AlertRepo;
use crate::schema;
use crate::telemetry_repo::TelemetryRepo;
use hs_core::config::{DbSettings, Tables};
use hs_core::error::StoreError;
use hs_core::store::Store;
use rusqlite::Connection;
use tracing::{debug, warn};

/// One connection, opened per request and closed on drop.
pub struct DbStore {
    conn: Connection,
    tables: Tables,
}

impl DbStore {
    pub fn new(conn: Connection, tables: Tables) -> Self {
        Self { conn, tables }
    }

    pub fn connect(settings: &DbSettings, tables: Tables) -> Result<Self, StoreError> {
        let conn = schema::connect(settings)?;
        Ok(Self::new(conn, tables))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for DbStore {
    fn drop(&mut self) {
        debug!("releasing database connection");
    }
}

impl Store for DbStore {
    type Alerts<'a>
        = AlertRepo<'a>
    where
        Self: 'a;
    type Telemetry<'a>
        = TelemetryRepo<'a>
    where
        Self: 'a;

    fn alerts(&self) -> Self::Alerts<'_> {
        AlertRepo::new(&self.conn, &self.tables.alerts)
    }

    fn telemetry(&self) -> Self::Telemetry<'_> {
        TelemetryRepo::new(&self.conn, &self.tables.telemetry)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Self) -> Result<T, StoreError>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|err| StoreError::Begin {
                message: err.to_string(),
            })?;
        debug!("transaction started");
        match f(self) {
            Ok(value) => match self.conn.execute_batch("COMMIT") {
                Ok(()) => {
                    debug!("transaction committed");
                    Ok(value)
                }
                Err(err) => {
                    self.rollback();
                    Err(StoreError::Commit {
                        message: err.to_string(),
                    })
                }
            },
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }
}

impl DbStore {
    fn rollback(&self) {
        if self.conn.is_autocommit() {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => debug!("transaction rolled back"),
            Err(err) => warn!("rollback failed: {err}"),
        }
    }
}

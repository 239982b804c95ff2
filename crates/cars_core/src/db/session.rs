//! Unit-of-work gateway over the shared SQLite connection.
//!
//! # Responsibility
//! - Own the single connection handle injected at startup.
//! - Run one closure per transaction: begin, execute, commit or roll back.
//!
//! # Invariants
//! - The connection guard is released on every path, including errors.
//! - A closure that panics leaves no writes behind and does not disable the
//!   handle for later calls.
//! - A closure error always rolls back and is returned unchanged.
//! - No transaction spans two `transact` calls.

use super::migrations::current_user_version;
use super::{open_db, open_db_in_memory, open_db_with_timeout, DbError, DbResult};
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Process-wide database handle shared by every repository.
///
/// Create it once and pass it around as `Arc<Database>`.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens (and migrates) a database file with a custom busy timeout.
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> DbResult<Self> {
        Ok(Self::from_connection(open_db_with_timeout(path, busy_timeout)?))
    }

    /// Opens a fresh, migrated in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    ///
    /// The caller is responsible for pragmas and migrations; prefer the
    /// `open*` constructors.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Schema version recorded in the database file.
    pub fn schema_version(&self) -> DbResult<u32> {
        current_user_version(&self.connection("schema_version"))
    }

    /// Runs `work` inside one IMMEDIATE transaction.
    ///
    /// Commits when `work` returns `Ok`, rolls back when it returns `Err`.
    /// `op` names the operation in log events.
    pub fn transact<T, E, F>(&self, op: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let started_at = Instant::now();
        let mut conn = self.connection(op);

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;

        match work(&tx) {
            Ok(value) => {
                tx.commit().map_err(DbError::from)?;
                debug!(
                    "event=db_tx module=db op={op} status=commit duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=db_tx module=db op={op} status=error error_code=rollback_failed error={rollback_err}"
                    );
                }
                debug!(
                    "event=db_tx module=db op={op} status=rollback duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    // A panicking unit of work poisons the mutex while its `Transaction` is
    // dropped, and the drop rolls it back; the connection itself stays valid.
    fn connection(&self, op: &'static str) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("event=db_tx module=db op={op} status=recovered error_code=connection_poisoned");
            self.conn.clear_poison();
            poisoned.into_inner()
        })
    }
}

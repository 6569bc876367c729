//! Scoped access to the database.
//!
//! Repositories never hold on to a connection. Each logical unit of work asks the
//! [`ConnectionManager`] for one through [`ConnectionManager::with_connection`] or
//! [`ConnectionManager::with_transaction`], and the connection is released when the closure
//! returns, whatever the outcome.
//!
//! For a database on disk a new connection is opened for every unit of work, so concurrent
//! callers never share connection state and ``SQLite``'s own locking provides isolation. An
//! in-memory database only exists for the lifetime of its connection; that single
//! connection is kept behind a mutex and the lock guard is the scope.
use crate::error::InventoryError;
use crate::repository::sqlite;
use crate::repository::SharedSqliteConnection;
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum ConnectionSource {
    OnDisk { path: PathBuf, busy_timeout: Duration },
    InMemory(SharedSqliteConnection),
}

pub struct ConnectionManager {
    source: ConnectionSource,
}

impl ConnectionManager {
    /// A manager opening a fresh connection to the file at `path` for each unit of work.
    /// The parent directory is created if needed.
    ///
    /// # Errors
    /// Fails if the directory cannot be created or the database cannot be opened.
    pub fn on_disk(path: &Path, busy_timeout: Duration) -> Result<Self, InventoryError> {
        // Open once up front so a bad path is reported here rather than on first use
        sqlite::create_connection(path, busy_timeout)?;
        Ok(Self {
            source: ConnectionSource::OnDisk {
                path: path.to_path_buf(),
                busy_timeout,
            },
        })
    }

    /// A manager for a private in-memory database.
    ///
    /// # Errors
    /// Fails if ``SQLite`` cannot allocate the database.
    pub fn in_memory() -> Result<Self, InventoryError> {
        let connection = Connection::open_in_memory()?;
        sqlite::configure_connection(&connection, None)?;
        Ok(Self {
            source: ConnectionSource::InMemory(Arc::new(Mutex::new(connection))),
        })
    }

    /// Runs `f` against a connection, releasing the connection afterwards.
    ///
    /// `f` must not call back into this manager: the in-memory connection is not reentrant.
    ///
    /// # Errors
    /// Whatever `f` returns, or a failure to obtain the connection.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T, InventoryError>
    where
        F: FnOnce(&Connection) -> Result<T, InventoryError>,
    {
        match &self.source {
            ConnectionSource::OnDisk { path, busy_timeout } => {
                let conn = sqlite::create_connection(path, *busy_timeout)?;
                f(&conn)
            }
            ConnectionSource::InMemory(shared) => {
                let conn = shared.lock().map_err(|_| InventoryError::LockPoisoned)?;
                f(&conn)
            }
        }
    }

    /// Runs `f` inside a transaction. The transaction is committed if `f` succeeds, and
    /// rolled back if `f` fails, in which case the error from `f` is returned. A panic in
    /// `f` also rolls back, as the transaction is dropped without being committed.
    ///
    /// Transactions do not nest; `f` must only use the handle it is given.
    ///
    /// # Errors
    /// The error returned by `f`, or a failure to begin or commit.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T, InventoryError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, InventoryError>,
    {
        match &self.source {
            ConnectionSource::OnDisk { path, busy_timeout } => {
                let mut conn = sqlite::create_connection(path, *busy_timeout)?;
                run_in_transaction(&mut conn, f)
            }
            ConnectionSource::InMemory(shared) => {
                let mut conn = shared.lock().map_err(|_| InventoryError::LockPoisoned)?;
                run_in_transaction(&mut conn, f)
            }
        }
    }
}

fn run_in_transaction<T, F>(conn: &mut Connection, f: F) -> Result<T, InventoryError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, InventoryError>,
{
    // Take the write lock up front, so two writers never both hold a read lock and deadlock
    // on the upgrade.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    debug!("Transaction started");
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            debug!("Transaction failed, rolling back: {err}");
            if let Err(rollback_err) = tx.rollback() {
                warn!("Rollback failed: {rollback_err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    fn manager_with_table() -> Result<ConnectionManager, InventoryError> {
        let manager = ConnectionManager::in_memory()?;
        manager.with_connection(|conn| {
            conn.execute("CREATE TABLE t (v INTEGER NOT NULL)", [])?;
            Ok(())
        })?;
        Ok(manager)
    }

    fn count(manager: &ConnectionManager) -> Result<i64, InventoryError> {
        manager.with_connection(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))?))
    }

    #[test]
    fn transaction_commits_on_success() -> Result<(), InventoryError> {
        let manager = manager_with_table()?;
        manager.with_transaction(|tx| {
            tx.execute("INSERT INTO t (v) VALUES (?1)", params![1])?;
            tx.execute("INSERT INTO t (v) VALUES (?1)", params![2])?;
            Ok(())
        })?;
        assert_eq!(count(&manager)?, 2);
        Ok(())
    }

    #[test]
    fn transaction_rolls_back_and_returns_the_error() -> Result<(), InventoryError> {
        let manager = manager_with_table()?;
        let result: Result<(), InventoryError> = manager.with_transaction(|tx| {
            tx.execute("INSERT INTO t (v) VALUES (?1)", params![1])?;
            Err(InventoryError::InvalidState("boom".to_string()))
        });
        assert!(matches!(result, Err(InventoryError::InvalidState(_))));
        assert_eq!(count(&manager)?, 0, "insert should have been rolled back");
        Ok(())
    }

    #[test]
    fn connection_is_released_after_failure() -> Result<(), InventoryError> {
        let manager = manager_with_table()?;
        let failed: Result<i64, InventoryError> =
            manager.with_connection(|conn| Ok(conn.query_row("SELECT nope FROM t", [], |r| r.get(0))?));
        assert!(matches!(failed, Err(InventoryError::Persistence(_))));
        // Would dead lock if the guard had leaked
        assert_eq!(count(&manager)?, 0);
        Ok(())
    }

    #[test]
    fn on_disk_connections_share_the_file() -> Result<(), InventoryError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("test.db");
        let manager = ConnectionManager::on_disk(&path, Duration::from_millis(500))?;
        manager.with_connection(|conn| {
            conn.execute("CREATE TABLE t (v INTEGER NOT NULL)", [])?;
            Ok(())
        })?;
        manager.with_transaction(|tx| {
            tx.execute("INSERT INTO t (v) VALUES (42)", [])?;
            Ok(())
        })?;
        assert_eq!(count(&manager)?, 1);
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn foreign_keys_are_enabled_per_connection() -> Result<(), InventoryError> {
        let manager = ConnectionManager::in_memory()?;
        let enabled: i32 =
            manager.with_connection(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |r| r.get(0))?))?;
        assert_eq!(enabled, 1);
        Ok(())
    }
}

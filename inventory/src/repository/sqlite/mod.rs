use crate::error::InventoryError;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub(crate) mod sqlite_company_repo;
pub(crate) mod sqlite_computer_repo;

/// Creates the entire database schema by running schema creation functions for all entities.
#[allow(clippy::module_name_repetitions)]
pub(crate) fn create_schema(connection: &Connection) -> Result<(), InventoryError> {
    sqlite_company_repo::create_company_table(connection)?;
    sqlite_computer_repo::create_computer_table(connection)?;
    Ok(())
}

/// Name of the SQL function that lower-cases text with Unicode rules. SQLite's own
/// `lower()` and `LIKE` only fold ASCII letters.
pub(crate) const FOLD_FUNCTION: &str = "inventory_fold";

/// Settings applied to every connection when it is opened.
pub(crate) fn configure_connection(
    connection: &Connection,
    busy_timeout: Option<Duration>,
) -> Result<(), InventoryError> {
    connection.pragma_update(None, "foreign_keys", true)?;
    connection.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    if let Some(timeout) = busy_timeout {
        connection.busy_timeout(timeout)?;
    }
    Ok(())
}

pub(crate) fn create_connection(
    dbms_path: &Path,
    busy_timeout: Duration,
) -> Result<Connection, InventoryError> {
    if let Some(parent) = dbms_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(dbms_path).map_err(|e| InventoryError::OpenDbms {
        path: dbms_path.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    configure_connection(&connection, Some(busy_timeout))?;
    Ok(connection)
}

#[cfg(test)]
pub(crate) mod tests;

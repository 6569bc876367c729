mod schema_tests;

use super::*;
use crate::repository::database_manager::{DatabaseConfig, DatabaseManager};
use rusqlite::params;

/// Creates a `DatabaseManager` with an in-memory database suitable for testing.
pub fn test_database_manager() -> Result<DatabaseManager, InventoryError> {
    let _ = env_logger::builder().is_test(true).try_init();
    DatabaseManager::new(&DatabaseConfig::SqliteInMemory)
}

/// Inserts a company with a chosen id, bypassing the repository.
pub fn insert_company(
    db_manager: &DatabaseManager,
    id: i64,
    name: &str,
) -> Result<(), InventoryError> {
    db_manager.connection_manager().with_connection(|conn| {
        conn.execute(
            "INSERT INTO company (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
        Ok(())
    })
}

/// Inserts a computer with a chosen id and no dates, bypassing the repository.
pub fn insert_computer(
    db_manager: &DatabaseManager,
    id: i64,
    name: &str,
    company_id: Option<i64>,
) -> Result<(), InventoryError> {
    db_manager.connection_manager().with_connection(|conn| {
        conn.execute(
            "INSERT INTO computer (id, name, company_id) VALUES (?1, ?2, ?3)",
            params![id, name, company_id],
        )?;
        Ok(())
    })
}

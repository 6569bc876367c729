use crate::error::InventoryError;
use crate::repository::sqlite::tests::test_database_manager;
use crate::repository::sqlite::FOLD_FUNCTION;
use rusqlite::Connection;

#[test]
fn test_foreign_keys_enabled() -> Result<(), InventoryError> {
    let db_manager = test_database_manager()?;

    let foreign_keys_enabled = db_manager
        .connection_manager()
        .with_connection(is_foreign_keys_enabled)?;

    assert!(foreign_keys_enabled, "Foreign keys should be enabled");
    Ok(())
}

#[test]
fn test_schema_creation_is_idempotent() -> Result<(), InventoryError> {
    let db_manager = test_database_manager()?;
    db_manager
        .connection_manager()
        .with_connection(crate::repository::sqlite::create_schema)?;

    let tables: Vec<String> = db_manager.connection_manager().with_connection(|conn| {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('company', 'computer') ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    })?;
    assert_eq!(tables, vec!["company", "computer"]);
    Ok(())
}

#[test]
fn fold_function_lowercases_unicode_text() -> Result<(), InventoryError> {
    let db_manager = test_database_manager()?;
    let (folded, null): (String, Option<String>) =
        db_manager.connection_manager().with_connection(|conn| {
            let sql = format!("SELECT {0}('ÉCRAN Ü'), {0}(NULL)", FOLD_FUNCTION);
            Ok(conn.query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))?)
        })?;
    assert_eq!(folded, "écran ü");
    assert_eq!(null, None);
    Ok(())
}

/// Helper function to check if foreign keys are enabled in an SQLite connection
fn is_foreign_keys_enabled(conn: &Connection) -> Result<bool, InventoryError> {
    let enabled: i32 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
    Ok(enabled == 1)
}

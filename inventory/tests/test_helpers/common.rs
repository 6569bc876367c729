use inventory::config::AppConfiguration;
use inventory::{error::InventoryError, InventoryRuntime, InventoryRuntimeBuilder};
use std::path::Path;
use std::sync::Arc;

/// Creates a test runtime with a private in-memory database
#[allow(dead_code)]
pub fn create_test_runtime() -> Result<Arc<InventoryRuntime>, InventoryError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let runtime = InventoryRuntimeBuilder::new()
        .with_configuration(AppConfiguration::default())
        .use_in_memory_db()
        .build()?;

    Ok(Arc::new(runtime))
}

/// Creates a test runtime backed by a database file at `path`
#[allow(dead_code)]
pub fn create_on_disk_runtime(path: &Path) -> Result<InventoryRuntime, InventoryError> {
    let _ = env_logger::builder().is_test(true).try_init();

    InventoryRuntimeBuilder::new()
        .with_configuration(AppConfiguration::default())
        .use_database_path(path)
        .build()
}

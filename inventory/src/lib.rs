use crate::config::AppConfiguration;
use crate::error::InventoryError;
use crate::repository::database_manager::{DatabaseConfig, DatabaseManager};
use crate::service::cascade::CascadingDeleteCoordinator;
use crate::service::company_service::CompanyService;
use crate::service::computer_service::ComputerService;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod input;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod service;
pub mod types;

/// The services of the inventory, wired to one database. Build it once with
/// [`InventoryRuntimeBuilder`] and share it.
pub struct InventoryRuntime {
    config: AppConfiguration,
    database: DatabaseManager,
    company_service: Arc<CompanyService>,
    computer_service: Arc<ComputerService>,
}

impl InventoryRuntime {
    #[must_use]
    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    #[must_use]
    pub fn company_service(&self) -> Arc<CompanyService> {
        self.company_service.clone()
    }

    #[must_use]
    pub fn computer_service(&self) -> Arc<ComputerService> {
        self.computer_service.clone()
    }

    #[must_use]
    pub fn cascading_delete(&self) -> Arc<CascadingDeleteCoordinator> {
        self.database.cascading_delete()
    }

    #[must_use]
    pub fn database(&self) -> &DatabaseManager {
        &self.database
    }
}

#[derive(Default)]
pub struct InventoryRuntimeBuilder {
    config: Option<AppConfiguration>,
    database_path: Option<PathBuf>,
    use_in_memory_db: bool,
}

impl InventoryRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a private in-memory database, mostly for testing.
    #[must_use]
    pub fn use_in_memory_db(mut self) -> Self {
        self.use_in_memory_db = true;
        self
    }

    /// Overrides the database file named by the configuration.
    #[must_use]
    pub fn use_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Uses the given configuration instead of loading the configuration file.
    #[must_use]
    pub fn with_configuration(mut self, config: AppConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    /// Opens the database, creates the schema if needed and wires the services.
    ///
    /// # Errors
    /// Fails if the configuration file cannot be read or the database cannot be opened.
    pub fn build(self) -> Result<InventoryRuntime, InventoryError> {
        let config = match self.config {
            Some(config) => config,
            None => config::load()?,
        };

        let database_config = if self.use_in_memory_db {
            DatabaseConfig::SqliteInMemory
        } else {
            DatabaseConfig::SqliteOnDisk {
                path: self
                    .database_path
                    .unwrap_or_else(|| PathBuf::from(&config.database.path)),
                busy_timeout: config.database.busy_timeout(),
            }
        };
        debug!("Opening inventory database {database_config:?}");

        let database = DatabaseManager::new(&database_config)?;
        let company_service = Arc::new(CompanyService::new(database.create_company_repository()));
        let computer_service =
            Arc::new(ComputerService::new(database.create_computer_repository()));

        Ok(InventoryRuntime {
            config,
            database,
            company_service,
            computer_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_runtime_starts_empty() -> Result<(), InventoryError> {
        let runtime = InventoryRuntimeBuilder::new()
            .with_configuration(AppConfiguration::default())
            .use_in_memory_db()
            .build()?;
        assert_eq!(runtime.company_service().count()?, 0);
        assert_eq!(runtime.computer_service().count_all()?, 0);
        Ok(())
    }

    #[test]
    fn database_path_override_creates_the_file() -> Result<(), InventoryError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data").join("inventory.db");
        let runtime = InventoryRuntimeBuilder::new()
            .with_configuration(AppConfiguration::default())
            .use_database_path(&path)
            .build()?;

        let company = runtime.company_service().create("Atari")?;
        assert!(path.exists());
        assert_eq!(runtime.company_service().find(company.id)?, company);
        Ok(())
    }
}

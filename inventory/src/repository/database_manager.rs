use crate::error::InventoryError;
use crate::repository::company_repository::CompanyRepository;
use crate::repository::computer_repository::ComputerRepository;
use crate::repository::connection_manager::ConnectionManager;
use crate::repository::sqlite;
use crate::repository::sqlite::sqlite_company_repo::SqliteCompanyRepository;
use crate::repository::sqlite::sqlite_computer_repo::SqliteComputerRepository;
use crate::service::cascade::CascadingDeleteCoordinator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Represents parameters for initializing the database connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// SQLite database with a specific file path
    SqliteOnDisk {
        path: PathBuf,
        busy_timeout: Duration,
    },

    /// SQLite database that runs entirely in memory
    SqliteInMemory,
}

pub struct DatabaseManager {
    connections: Arc<ConnectionManager>,
    cascade: Arc<CascadingDeleteCoordinator>,
}

impl DatabaseManager {
    /// Creates a new `DatabaseManager` based on the provided configuration and makes sure the
    /// schema exists.
    ///
    /// # Errors
    /// Fails if the database cannot be opened or the schema cannot be created.
    pub fn new(config: &DatabaseConfig) -> Result<Self, InventoryError> {
        let connections = match config {
            DatabaseConfig::SqliteOnDisk { path, busy_timeout } => {
                ConnectionManager::on_disk(path, *busy_timeout)?
            }
            DatabaseConfig::SqliteInMemory => ConnectionManager::in_memory()?,
        };
        let connections = Arc::new(connections);

        connections.with_connection(sqlite::create_schema)?;

        let cascade = Arc::new(CascadingDeleteCoordinator::new(connections.clone()));
        Ok(Self {
            connections,
            cascade,
        })
    }

    /// Provide access to the shared connection manager.
    pub fn connection_manager(&self) -> Arc<ConnectionManager> {
        self.connections.clone()
    }

    pub fn cascading_delete(&self) -> Arc<CascadingDeleteCoordinator> {
        self.cascade.clone()
    }

    pub fn create_company_repository(&self) -> Arc<dyn CompanyRepository> {
        Arc::new(SqliteCompanyRepository::new(
            self.connection_manager(),
            self.cascading_delete(),
        ))
    }

    pub fn create_computer_repository(&self) -> Arc<dyn ComputerRepository> {
        Arc::new(SqliteComputerRepository::new(self.connection_manager()))
    }
}

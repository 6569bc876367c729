use crate::error::InventoryError;
use crate::query::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration struct
/// Holds the location of the inventory database and the listing preferences
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct AppConfiguration {
    /// Missing sections in an older file are filled in with defaults
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub listing: ListingSettings,
}

/// Holds the configuration for the `database` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct DatabaseSettings {
    /// The path to the Sqlite file holding companies and computers
    #[serde(default = "default_database_path")]
    pub path: String,

    /// How long a statement waits for a lock held by another process
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl DatabaseSettings {
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ListingSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingSettings {
    fn default() -> Self {
        ListingSettings {
            page_size: default_page_size(),
        }
    }
}

/// Filename holding the application configuration parameters
#[must_use]
pub fn configuration_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.preference_dir().join("config.toml"),
        None => PathBuf::from("computer-db.toml"),
    }
}

/// Filename of the Sqlite DBMS holding the inventory
#[must_use]
pub fn database_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join("inventory.db"),
        None => PathBuf::from("inventory.db"),
    }
}

/// Loads the configuration file, or the defaults if there is none yet.
#[allow(clippy::missing_errors_doc)]
pub fn load() -> Result<AppConfiguration, InventoryError> {
    load_from(&configuration_file())
}

#[allow(clippy::missing_errors_doc)]
pub fn load_from(path: &Path) -> Result<AppConfiguration, InventoryError> {
    if !path.try_exists()? {
        debug!("No configuration file {}, using defaults", path.display());
        return Ok(AppConfiguration::default());
    }
    read(path)
}

#[allow(clippy::missing_errors_doc)]
pub fn save(cfg: &AppConfiguration) -> Result<()> {
    create_configuration_file(cfg, &configuration_file())
}

#[allow(clippy::missing_errors_doc)]
pub fn remove() -> io::Result<()> {
    fs::remove_file(configuration_file().as_path())
}

#[allow(clippy::missing_errors_doc)]
pub fn application_config_to_string(cfg: &AppConfiguration) -> Result<String> {
    Ok(toml::to_string::<AppConfiguration>(cfg)?)
}

fn default_database_path() -> String {
    database_file().to_string_lossy().to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "inventory", "computer-db")
}

/// Reads the `Application` configuration struct from the supplied TOML file
fn read(path: &Path) -> Result<AppConfiguration, InventoryError> {
    let mut file = File::open(path).map_err(|source| InventoryError::ApplicationConfig {
        path: path.into(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| InventoryError::ApplicationConfig {
            path: path.into(),
            source,
        })?;
    toml::from_str::<AppConfiguration>(&contents).map_err(|source| InventoryError::TomlParse {
        path: path.into(),
        source,
    })
}

fn create_configuration_file(cfg: &AppConfiguration, path: &Path) -> Result<()> {
    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() && !directory.try_exists()? {
            fs::create_dir_all(directory)?;
        }
    }

    let mut file = File::create(path)
        .map_err(|_src_err| InventoryError::ConfigFileCreation { path: path.into() })?;
    let toml = application_config_to_string(cfg)?;
    file.write_all(toml.as_bytes())?;
    debug!("Configuration written to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_parsing() -> Result<(), InventoryError> {
        let toml_str = r#"
        [database]
        path = "/var/lib/inventory/computers.db"
        busy_timeout_ms = 250

        [listing]
        page_size = 50
        "#;

        let app_config: AppConfiguration =
            toml::from_str(toml_str).map_err(|source| InventoryError::TomlParse {
                path: PathBuf::from("inline"),
                source,
            })?;
        assert_eq!(app_config.database.path, "/var/lib/inventory/computers.db");
        assert_eq!(app_config.database.busy_timeout(), Duration::from_millis(250));
        assert_eq!(app_config.listing.page_size, 50);
        Ok(())
    }

    /// Sections and keys left out of the file get their defaults
    #[test]
    fn test_toml_parsing_with_defaults_generated() -> Result<(), InventoryError> {
        let toml_str = r#"
        [database]
        path = "inventory.db"
        "#;

        let app_config: AppConfiguration =
            toml::from_str(toml_str).map_err(|source| InventoryError::TomlParse {
                path: PathBuf::from("inline"),
                source,
            })?;
        assert_eq!(app_config.database.path, "inventory.db");
        assert_eq!(app_config.database.busy_timeout_ms, 5000);
        assert_eq!(app_config.listing, ListingSettings::default());
        Ok(())
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<(), InventoryError> {
        let dir = tempfile::tempdir()?;
        let cfg = load_from(&dir.path().join("absent.toml"))?;
        assert_eq!(cfg, AppConfiguration::default());
        assert_eq!(cfg.database.path, database_file().to_string_lossy());
        Ok(())
    }

    #[test]
    fn test_write_and_read_toml_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let tmp_config_file = dir.path().join("nested").join("config.toml");

        let cfg = AppConfiguration {
            database: DatabaseSettings {
                path: "computers.db".to_string(),
                busy_timeout_ms: 1000,
            },
            listing: ListingSettings { page_size: 100 },
        };

        create_configuration_file(&cfg, &tmp_config_file)?;
        assert_eq!(read(&tmp_config_file)?, cfg);
        assert_eq!(load_from(&tmp_config_file)?, cfg);
        Ok(())
    }

    #[test]
    fn malformed_file_is_reported_with_its_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[listing]\npage_size = \"many\"\n")?;

        match load_from(&path) {
            Err(InventoryError::TomlParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parse error, got {other:?}"),
        }
        Ok(())
    }
}

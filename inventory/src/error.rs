use std::{io, path::PathBuf};

use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("No {entity} found with id {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Could not make sense of input: {0}")]
    Validation(String),
    #[error("Unable to load the application configuration file {path:?}")]
    ApplicationConfig { path: PathBuf, source: io::Error },
    #[error("Unable to parse contents of {path:?}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unable to create configuration file {path:?}")]
    ConfigFileCreation { path: PathBuf },
    #[error("Unable to open DBMS in file {path}: {reason}")]
    OpenDbms { path: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Mutex locking error")]
    LockPoisoned,
}

impl InventoryError {
    /// Is this the error returned when a lookup by id matched no row?
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for InventoryError {
    fn from(err: rusqlite::Error) -> Self {
        InventoryError::Persistence(format!("Sqlite error {err}"))
    }
}

impl From<chrono::ParseError> for InventoryError {
    fn from(err: chrono::ParseError) -> Self {
        InventoryError::Validation(format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing(path: &std::path::Path) -> Result<String, InventoryError> {
        Ok(std::fs::read_to_string(path)?)
    }

    #[test]
    fn io_errors_keep_their_cause_in_the_message() -> Result<(), InventoryError> {
        let dir = tempfile::tempdir()?;
        let err = read_missing(&dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, InventoryError::Io(_)));
        let message = err.to_string();
        assert!(message.starts_with("I/O error: "), "{message}");
        assert!(!message.contains("Directory creation"), "{message}");
        Ok(())
    }
}

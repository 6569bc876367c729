use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// Application repository modules, each representing specific database entity operations.
pub mod company_repository;
pub mod computer_repository;

// Database-related utilities and managers.
pub mod connection_manager;
pub mod database_manager;
pub(crate) mod sqlite;

/// A thread-safe, shared connection to an ``SQLite`` database. Only used for in-memory
/// databases, which exist for exactly one connection.
pub(crate) type SharedSqliteConnection = Arc<Mutex<Connection>>;

//! # The Computer Inventory Command Line Utility
//!
//! Lists, adds, updates and deletes computers and the companies which made them. The data
//! lives in a local Sqlite database.
//!
//! ## Configuration
//! The database location and the default page size are kept in a configuration file:
//! ```bash
//! computer-db config update --database-file ~/inventory.db --page-size 50
//! ```
//!
//! ## Usage Examples
//!
//! ### Listing
//! Second page of the computers made by companies with "apple" in their name, newest first:
//! ```bash
//! computer-db computers --search apple --sort introduced --order DESC --page 1 --size 50
//! ```
//!
//! ### Editing
//! ```bash
//! computer-db add-company --name "Commodore International"
//! computer-db add --name "Amiga 500" --introduced 1987-04-01 --company 6
//! computer-db update 574 --name "Amiga 500" --introduced 1987-04-01 --discontinued 1991-12-31 --company 6
//! ```
//!
//! ### Deleting
//! Several computers at once, or a company together with its computers:
//! ```bash
//! computer-db del 3,17,42
//! computer-db del-company 6
//! ```
use clap::Parser;
use cli::{Command, LogLevel, Opts};
use commands::{companies, computers, configuration};
use env_logger::Env;
use inventory::{error::InventoryError, InventoryRuntime, InventoryRuntimeBuilder};
use log::debug;
use std::process::exit;

mod cli;
mod commands;

fn main() {
    let opts: Opts = Opts::parse();

    configure_logging(&opts); // Handles the -v option

    if let Err(err) = run(&opts) {
        eprintln!("ERROR: {err}");
        exit(exit_code(&err));
    }
}

fn run(opts: &Opts) -> Result<(), InventoryError> {
    match &opts.cmd {
        Command::Companies(list) => companies::list(&get_runtime(opts), list),
        Command::Computers(list) => computers::list(&get_runtime(opts), list),
        Command::Show(show) => computers::show(&get_runtime(opts), show),
        Command::Add(fields) => computers::add(&get_runtime(opts), fields),
        Command::Update(update) => computers::update(&get_runtime(opts), update),
        Command::Del(del) => computers::delete(&get_runtime(opts), del),
        Command::AddCompany(add) => companies::add(&get_runtime(opts), add),
        Command::DelCompany(del) => companies::delete(&get_runtime(opts), del),
        Command::Config(config) => {
            configuration::execute(&config.cmd);
            Ok(())
        }
    }
}

/// Opens the inventory database named by the configuration or the `--database` option
fn get_runtime(opts: &Opts) -> InventoryRuntime {
    let mut builder = InventoryRuntimeBuilder::new();
    if let Some(path) = &opts.database {
        builder = builder.use_database_path(path);
    }
    match builder.build() {
        Ok(runtime) => runtime,
        Err(err) => {
            match err {
                InventoryError::TomlParse { .. } | InventoryError::ApplicationConfig { .. } => {
                    eprintln!(
                        "Unable to read the configuration: '{err}'. Use 'computer-db config update' to recreate it"
                    );
                }
                _ => {
                    eprintln!("Failed to open the inventory: '{err}'");
                }
            }

            exit(1);
        }
    }
}

fn exit_code(err: &InventoryError) -> i32 {
    match err {
        InventoryError::Validation(_) | InventoryError::InvalidState(_) => 2,
        InventoryError::NotFound { .. } => 3,
        _ => 1,
    }
}

fn configure_logging(opts: &Opts) {
    // If nothing else was specified in RUST_LOG, use 'warn'
    env_logger::Builder::from_env(Env::default().default_filter_or(opts.verbosity.map_or(
        "warn",
        |lvl| match lvl {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        },
    )))
    .target(env_logger::Target::Stderr)
    .init();
    debug!("Logging started");
}

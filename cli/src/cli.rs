use std::fmt::{self, Formatter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub(crate) enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
/// Computer inventory - list, add, update and delete computers and their manufacturers
///
/// Dates are given in the ISO8601 format without a time, i.e. `1984-01-24`.
///
/// Several computers are deleted at once by separating their ids with commas: `del 3,17,42`
#[command(author, version, about)] // Read from Cargo.toml
pub(crate) struct Opts {
    #[command(subcommand)]
    pub cmd: Command,

    #[arg(global = true, short, long)]
    pub verbosity: Option<LogLevel>,

    /// Use this database file instead of the one in the configuration
    #[arg(global = true, long)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List companies
    Companies(Companies),
    /// List computers, optionally sorted and filtered
    Computers(Computers),
    /// Show a single computer
    Show(Show),
    /// Add a computer
    Add(ComputerFields),
    /// Update every field of a computer
    Update(UpdateComputer),
    /// Delete one or more computers
    Del(Del),
    /// Add a company
    AddCompany(AddCompany),
    /// Delete a company and every computer it made
    DelCompany(DelCompany),
    /// Subcommands for configuration
    Config(Config),
}

#[derive(Args)]
pub(crate) struct Companies {
    /// List every company instead of a single page
    #[arg(short, long)]
    pub all: bool,
    /// Zero based page index
    #[arg(short, long, default_value_t = 0)]
    pub page: u32,
    /// Rows per page, the configured page size if not given
    #[arg(short, long)]
    pub size: Option<u32>,
}

#[derive(Args)]
pub(crate) struct Computers {
    /// Zero based page index
    #[arg(short, long, default_value_t = 0)]
    pub page: u32,
    /// Rows per page: 10, 50 or 100
    #[arg(long)]
    pub size: Option<String>,
    /// computerName, introduced, discontinued or companyName
    #[arg(long)]
    pub sort: Option<String>,
    /// ASC or DESC
    #[arg(long)]
    pub order: Option<String>,
    /// Only computers whose name, or whose company's name, contains this text
    #[arg(short = 'f', long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub(crate) struct Show {
    pub id: String,
}

#[derive(Args, Clone)]
pub(crate) struct ComputerFields {
    #[arg(short, long)]
    pub name: String,
    /// Date introduced, i.e. 1984-01-24
    #[arg(short, long)]
    pub introduced: Option<String>,
    /// Date discontinued
    #[arg(short, long)]
    pub discontinued: Option<String>,
    /// Id of the manufacturer
    #[arg(short, long)]
    pub company: Option<String>,
}

#[derive(Args)]
pub(crate) struct UpdateComputer {
    pub id: String,
    #[command(flatten)]
    pub fields: ComputerFields,
}

#[derive(Args)]
pub(crate) struct Del {
    /// Comma separated list of computer ids
    pub ids: String,
}

#[derive(Args)]
pub(crate) struct AddCompany {
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args)]
pub(crate) struct DelCompany {
    pub id: String,
}

#[derive(Args)]
pub(crate) struct Config {
    #[command(subcommand)]
    pub cmd: ConfigCommand,
}

/// Create, modify or list the configuration file.
#[derive(Subcommand, Clone)]
pub(crate) enum ConfigCommand {
    /// Update the configuration file
    Update(UpdateConfiguration),
    /// write current configuration to standard output
    List,
    /// Remove the current configuration
    Remove,
}

#[derive(Args, Clone)]
pub(crate) struct UpdateConfiguration {
    /// Path of the Sqlite database file
    #[arg(long = "database-file")]
    pub database: Option<PathBuf>,
    /// Milliseconds to wait for a database locked by another process
    #[arg(long)]
    pub busy_timeout_ms: Option<u64>,
    /// Default number of rows per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

//! Library module for txtsql-export
//!
//! Exposes the CLI definition and settings resolution for testing. The run
//! workflows live in [`run`]; `main.rs` only wires them together.

pub mod run;

use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use txtsql_core::{
    AppSettings, ConnectionString, Result,
    config::{DEFAULT_CONNECTION_NAME, default_settings_path},
};

/// Environment variable that overrides the configured connection string.
pub const CONNECTION_STRING_ENV: &str = "TXTSQL_CONNECTION_STRING";

/// CLI argument structure
#[derive(Parser, Debug)]
#[command(name = "txtsql-export")]
#[command(about = "Export SQL Server object definitions to .sql files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "
txtsql-export - SQL Server object definition exporter

Connects to the database named by the configured connection string and
writes one .sql file per object:

  <output>/<database>/tables/<name>.sql            synthesized CREATE TABLE
  <output>/<database>/views/<name>.sql             sp_helptext source
  <output>/<database>/storedprocedures/<name>.sql  sp_helptext source
  <output>/<database>/functions/<name>.sql         sp_helptext source

CONFIGURATION:
  appsettings.json next to the executable (or --config) must contain
  ConnectionStrings.DefaultConnection. TXTSQL_CONNECTION_STRING overrides it.

EXAMPLES:
  txtsql-export
  txtsql-export --config ./appsettings.json --output ./schema
  txtsql-export test
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Subcommand to execute (defaults to export)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Export all tables, views, stored procedures, and functions
    Export,
    /// Open and close a connection without exporting anything
    Test,
}

/// Logging flags
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress diagnostics
    #[arg(short, long, global = true, help = "Suppress all diagnostics except errors")]
    pub quiet: bool,
}

/// Where settings come from
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Settings file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to appsettings.json (default: next to the executable)"
    )]
    pub config: Option<PathBuf>,

    /// Connection string name
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        default_value = DEFAULT_CONNECTION_NAME,
        help = "Entry under ConnectionStrings to use"
    )]
    pub connection_name: String,

    /// Output root directory
    #[arg(
        short,
        long,
        global = true,
        value_name = "DIR",
        help = "Output root (overrides Export.OutputDirectory)"
    )]
    pub output: Option<PathBuf>,
}

/// Where the connection string was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    /// `TXTSQL_CONNECTION_STRING`
    Environment,
    /// Named entry in the settings file
    Settings { name: String },
}

/// Everything a run needs, resolved from settings, environment, and flags.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub settings_path: PathBuf,
    pub connection_string: ConnectionString,
    pub source: ConnectionSource,
    pub output_root: PathBuf,
    pub connect_timeout: Duration,
}

/// Path of the settings file: `--config` if given, otherwise
/// `appsettings.json` next to the executable.
///
/// # Errors
/// Returns an I/O error if the executable path cannot be determined.
pub fn settings_file(args: &SettingsArgs) -> Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => default_settings_path(),
    }
}

/// Reads the settings file and resolves the run from it.
///
/// # Errors
/// Returns a configuration error if the file is absent or malformed, or if
/// no usable connection string is found.
pub async fn load_run(args: &SettingsArgs) -> Result<ResolvedRun> {
    let settings_path = settings_file(args)?;
    let settings = AppSettings::load(&settings_path).await?;
    resolve_run(args, settings_path, &settings)
}

/// Resolves the connection string and output root from loaded settings.
///
/// The connection string comes from `TXTSQL_CONNECTION_STRING` when that
/// is set and non-blank, otherwise from `ConnectionStrings.<connection_name>`.
///
/// # Security
/// The connection string is never logged; only its source is.
///
/// # Errors
/// Returns a configuration error if no usable connection string is found.
pub fn resolve_run(
    args: &SettingsArgs,
    settings_path: PathBuf,
    settings: &AppSettings,
) -> Result<ResolvedRun> {
    let (connection_string, source) = match env::var(CONNECTION_STRING_ENV) {
        Ok(value) if !value.trim().is_empty() => (
            ConnectionString::new(value),
            ConnectionSource::Environment,
        ),
        _ => (
            settings.connection_string(&args.connection_name)?,
            ConnectionSource::Settings {
                name: args.connection_name.clone(),
            },
        ),
    };

    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| settings.export.output_directory.clone());

    Ok(ResolvedRun {
        settings_path,
        connection_string,
        source,
        output_root,
        connect_timeout: settings.export.connect_timeout(),
    })
}

//! SQL Server object definition exporter.
//!
//! This binary connects to one database and writes every table, view,
//! stored procedure, and function definition to its own `.sql` file.
//!
//! # Guarantees
//! - Read-only database statements only
//! - Connection strings are redacted in logs and errors
//! - The first failure aborts the run with a non-zero exit code

use anyhow::Context;
use clap::Parser;
use tracing::error;
use txtsql_core::init_logging;
use txtsql_export::{Cli, Command, load_run, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let resolved = load_run(&cli.settings)
        .await
        .context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Export) {
        Command::Export => {
            run::export(&resolved).await.map_err(|e| {
                error!("Export aborted: {}", e);
                e
            })?;
        }
        Command::Test => {
            run::test_connection(&resolved)
                .await
                .context("Connection test failed")?;
        }
    }

    Ok(())
}

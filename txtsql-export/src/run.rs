//! Export and connection-test workflows.
//!
//! Connect, export all four categories, disconnect. Any error propagates
//! to `main`, which aborts the process.

use crate::{ConnectionSource, ResolvedRun};
use tracing::{debug, info};
use txtsql_core::{
    ExportSummary, Exporter, ObjectCategory, Result, SqlServerCatalog, catalog::CatalogSource,
};

fn log_target(run: &ResolvedRun) {
    info!("Settings: {}", run.settings_path.display());
    match &run.source {
        ConnectionSource::Environment => {
            info!("Connection string: from {}", crate::CONNECTION_STRING_ENV);
        }
        ConnectionSource::Settings { name } => {
            info!("Connection string: ConnectionStrings:{}", name);
        }
    }
    info!("Target: {}", run.connection_string.redacted());
}

/// Final one-line report of per-category counts.
pub fn summary_line(summary: &ExportSummary) -> String {
    let counts = ObjectCategory::ALL
        .iter()
        .map(|category| format!("{} {}", summary.count(*category), category.dir_name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Exported {} objects from {}: {}",
        summary.total(),
        summary.database,
        counts
    )
}

/// Runs a full export.
///
/// # Errors
/// Returns the first connection, query, or filesystem error.
pub async fn export(run: &ResolvedRun) -> Result<ExportSummary> {
    log_target(run);
    info!("Output: {}", run.output_root.display());

    let mut catalog = SqlServerCatalog::connect(&run.connection_string, run.connect_timeout).await?;
    println!("Connection opened successfully!");

    let summary = Exporter::new(&run.output_root)
        .export_database(&mut catalog)
        .await?;

    catalog.close().await?;
    println!("Connection closed successfully!");
    println!("{}", summary_line(&summary));

    Ok(summary)
}

/// Opens a connection, reports the database name, and closes it.
///
/// # Errors
/// Returns a connection or query error.
pub async fn test_connection(run: &ResolvedRun) -> Result<()> {
    log_target(run);

    let mut catalog = SqlServerCatalog::connect(&run.connection_string, run.connect_timeout).await?;
    let database = catalog.database_name().await?;
    let version = catalog.server_version().await?;
    debug!("Server version: {}", version.lines().next().unwrap_or_default());

    catalog.close().await?;
    info!("Connection test successful");
    println!("Connection to SQL Server database '{}' successful", database);

    Ok(())
}

//! Core library for txtsql: export SQL Server object definitions to text files.
//!
//! A run connects once, then for each of tables, views, stored procedures,
//! and functions it creates `<root>/<database>/<category>/`, lists the
//! objects from `INFORMATION_SCHEMA`, and writes one `<name>.sql` file per
//! object. View and routine files hold the `sp_helptext` source; table files
//! hold a `CREATE TABLE` script rebuilt from column metadata.
//!
//! # Guarantees
//! - All database statements are read-only
//! - Connection strings are zeroed on drop and redacted in logs and errors
//! - Any failure aborts the run; no object is retried or skipped on error
//!
//! # Architecture
//! - [`catalog::CatalogSource`] abstracts the four catalog questions
//! - [`adapters::sqlserver`] answers them over one tiberius connection
//! - [`export::Exporter`] drives the sequence and writes files

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod logging;
pub mod models;
pub mod script;
pub mod security;

// Re-export commonly used types
pub use catalog::CatalogSource;
pub use config::{AppSettings, ExportSettings};
pub use error::{ExportError, Result};
pub use export::Exporter;
pub use layout::ExportLayout;
pub use logging::init_logging;
pub use models::{
    ColumnDefinition, ColumnLength, ExportSummary, ExportedObject, ObjectCategory,
    ObjectDescriptor,
};
pub use security::ConnectionString;

#[cfg(feature = "mssql")]
pub use adapters::SqlServerCatalog;

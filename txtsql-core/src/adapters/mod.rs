//! Database engine adapters implementing [`CatalogSource`](crate::catalog::CatalogSource).
//!
//! Only SQL Server is supported; the engine's `sp_helptext` procedure and
//! `INFORMATION_SCHEMA` views are what the exporter is built around.

#[cfg(feature = "mssql")]
pub mod sqlserver;

#[cfg(feature = "mssql")]
pub use sqlserver::SqlServerCatalog;

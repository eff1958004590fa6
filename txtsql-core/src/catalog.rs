//! Catalog access trait used by the exporter.
//!
//! The exporter only needs four questions answered about the connected
//! database. Keeping them behind a trait lets the export sequence run
//! against an in-memory catalog in tests.

use crate::models::{ColumnDefinition, ObjectCategory};
use crate::Result;
use async_trait::async_trait;

/// Read-only view of a database catalog over one open connection.
///
/// Methods take `&mut self` because the connection allows one query in
/// flight at a time. Each method drains its result set before returning.
///
/// # Errors
/// Every method fails with a `Query` error when the underlying query fails.
/// There is no partial-result recovery.
#[async_trait]
pub trait CatalogSource: Send {
    /// Short identifier of the engine, for logs.
    fn source_type(&self) -> &'static str;

    /// Name of the database the connection is bound to.
    async fn database_name(&mut self) -> Result<String>;

    /// Names of all objects in `category`, in catalog order.
    async fn list_objects(&mut self, category: ObjectCategory) -> Result<Vec<String>>;

    /// Column metadata for `table`, in the catalog's default order.
    async fn table_columns(&mut self, table: &str) -> Result<Vec<ColumnDefinition>>;

    /// Source text chunks for a view, procedure, or function, in result order.
    async fn definition_text(&mut self, name: &str) -> Result<Vec<String>>;
}

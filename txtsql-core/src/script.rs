//! `CREATE TABLE` script synthesis.
//!
//! SQL Server has no `sp_helptext` equivalent for tables, so a script is
//! rebuilt from `INFORMATION_SCHEMA.COLUMNS`. The result carries column
//! names, types, lengths, nullability, and identity only: keys, defaults,
//! checks, indexes, and computed columns are not reconstructed.

use crate::models::{ColumnDefinition, ColumnLength};

/// Separator placed between rendered columns.
const COLUMN_SEPARATOR: &str = ",\n";

/// Renders a single column line: `[name] type[(length)] NULL|NOT NULL[ IDENTITY(1,1)]`.
pub fn render_column(column: &ColumnDefinition) -> String {
    let mut line = format!("[{}] {}", column.name, column.data_type);

    match column.length {
        ColumnLength::None => {}
        ColumnLength::Bounded(n) => line.push_str(&format!("({})", n)),
        ColumnLength::Max => line.push_str("(MAX)"),
    }

    line.push_str(if column.is_nullable {
        " NULL"
    } else {
        " NOT NULL"
    });

    if column.is_identity {
        line.push_str(" IDENTITY(1,1)");
    }

    line
}

/// Builds the `CREATE TABLE` script for `table` from its columns.
///
/// Columns are emitted in the order given, which is the catalog's default
/// order and not necessarily the physical one.
///
/// # Example
/// ```rust
/// use txtsql_core::models::{ColumnDefinition, ColumnLength};
/// use txtsql_core::script::generate_table_script;
///
/// let columns = [
///     ColumnDefinition::new("id", "int").not_null().identity(),
///     ColumnDefinition::new("name", "varchar").with_length(ColumnLength::Bounded(50)),
/// ];
/// assert_eq!(
///     generate_table_script("T", &columns),
///     "CREATE TABLE [T] (\n[id] int NOT NULL IDENTITY(1,1),\n[name] varchar(50) NULL\n);"
/// );
/// ```
pub fn generate_table_script(table: &str, columns: &[ColumnDefinition]) -> String {
    let body = columns
        .iter()
        .map(render_column)
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);

    if body.is_empty() {
        format!("CREATE TABLE [{}] (\n);", table)
    } else {
        format!("CREATE TABLE [{}] (\n{}\n);", table, body)
    }
}

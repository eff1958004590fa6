//! Data models for catalog objects and exported files.
//!
//! Everything here lives for a single run: descriptors come out of catalog
//! queries, are exported immediately, and are then dropped.

use std::fmt;
use std::path::PathBuf;

/// Category of exportable database object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Table,
    View,
    StoredProcedure,
    Function,
}

impl ObjectCategory {
    /// All categories in export order.
    pub const ALL: [ObjectCategory; 4] = [
        ObjectCategory::Table,
        ObjectCategory::View,
        ObjectCategory::StoredProcedure,
        ObjectCategory::Function,
    ];

    /// Name of the subdirectory holding this category's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            ObjectCategory::Table => "tables",
            ObjectCategory::View => "views",
            ObjectCategory::StoredProcedure => "storedprocedures",
            ObjectCategory::Function => "functions",
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectCategory::Table => write!(f, "table"),
            ObjectCategory::View => write!(f, "view"),
            ObjectCategory::StoredProcedure => write!(f, "stored procedure"),
            ObjectCategory::Function => write!(f, "function"),
        }
    }
}

/// A database object observed during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectDescriptor {
    pub name: String,
    pub category: ObjectCategory,
}

impl ObjectDescriptor {
    pub fn new(name: impl Into<String>, category: ObjectCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Declared length of a column, from `CHARACTER_MAXIMUM_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLength {
    /// No length applies (numeric, date, ...)
    None,
    /// Fixed upper bound
    Bounded(i32),
    /// Unbounded (`-1` in the catalog), rendered as `MAX`
    Max,
}

impl ColumnLength {
    /// Interprets a raw `CHARACTER_MAXIMUM_LENGTH` value.
    pub fn from_catalog(raw: Option<i32>) -> Self {
        match raw {
            None => ColumnLength::None,
            Some(-1) => ColumnLength::Max,
            Some(n) => ColumnLength::Bounded(n),
        }
    }
}

/// Column metadata used to synthesize a table script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    pub length: ColumnLength,
    pub is_nullable: bool,
    pub is_identity: bool,
}

impl ColumnDefinition {
    /// Creates a nullable, non-identity column without a length.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            length: ColumnLength::None,
            is_nullable: true,
            is_identity: false,
        }
    }

    pub fn with_length(mut self, length: ColumnLength) -> Self {
        self.length = length;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }
}

/// One file written during an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedObject {
    pub descriptor: ObjectDescriptor,
    pub path: PathBuf,
}

/// Result of a completed export run.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub database: String,
    pub exported: Vec<ExportedObject>,
}

impl ExportSummary {
    /// Number of files written for a category.
    pub fn count(&self, category: ObjectCategory) -> usize {
        self.exported
            .iter()
            .filter(|object| object.descriptor.category == category)
            .count()
    }

    /// Total number of files written.
    pub fn total(&self) -> usize {
        self.exported.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_directories() {
        let dirs: Vec<_> = ObjectCategory::ALL.iter().map(|c| c.dir_name()).collect();
        assert_eq!(dirs, ["tables", "views", "storedprocedures", "functions"]);
    }

    #[test]
    fn test_column_length_from_catalog() {
        assert_eq!(ColumnLength::from_catalog(None), ColumnLength::None);
        assert_eq!(ColumnLength::from_catalog(Some(-1)), ColumnLength::Max);
        assert_eq!(ColumnLength::from_catalog(Some(50)), ColumnLength::Bounded(50));
    }

    #[test]
    fn test_summary_counts() {
        let summary = ExportSummary {
            database: "Sales".to_string(),
            exported: vec![
                ExportedObject {
                    descriptor: ObjectDescriptor::new("Orders", ObjectCategory::Table),
                    path: PathBuf::from("out/Sales/tables/Orders.sql"),
                },
                ExportedObject {
                    descriptor: ObjectDescriptor::new("Customers", ObjectCategory::Table),
                    path: PathBuf::from("out/Sales/tables/Customers.sql"),
                },
                ExportedObject {
                    descriptor: ObjectDescriptor::new("vOpenOrders", ObjectCategory::View),
                    path: PathBuf::from("out/Sales/views/vOpenOrders.sql"),
                },
            ],
        };

        assert_eq!(summary.count(ObjectCategory::Table), 2);
        assert_eq!(summary.count(ObjectCategory::View), 1);
        assert_eq!(summary.count(ObjectCategory::Function), 0);
        assert_eq!(summary.total(), 3);
    }
}

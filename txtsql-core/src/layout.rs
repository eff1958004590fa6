//! Output directory layout: `<root>/<database>/<category>/<name>.sql`.
//!
//! Database and object names come from the catalog and may contain
//! characters that are not safe in a path component. Those are
//! percent-encoded by [`path_component`], so every file stays inside its
//! category directory.

use crate::error::ExportError;
use crate::models::ObjectCategory;
use crate::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// File extension of every exported definition.
pub const DEFINITION_EXTENSION: &str = "sql";

/// Suffix of the staging file a definition is written to before it is
/// renamed into place.
pub const STAGING_SUFFIX: &str = "tmp";

/// Encodes a catalog name as a single path component.
///
/// `%`, path separators, characters reserved on Windows, and control
/// characters become `%XX`. A name made only of dots has every dot
/// encoded so it cannot mean the current or parent directory. Ordinary
/// names are returned unchanged, and the mapping is injective.
pub fn path_component(name: &str) -> String {
    let dots_only = !name.is_empty() && name.chars().all(|c| c == '.');
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        let reserved = matches!(c, '%' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            || c.is_control()
            || (dots_only && c == '.');
        if reserved {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Sibling of `path` that its contents are written to before the rename.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
    name.push(".");
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

/// Resolved output folder for one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    database_dir: PathBuf,
}

impl ExportLayout {
    /// Describes the layout without touching the filesystem.
    pub fn new(output_root: impl AsRef<Path>, database: &str) -> Self {
        Self {
            database_dir: output_root.as_ref().join(path_component(database)),
        }
    }

    /// `<root>/<database>`
    pub fn database_dir(&self) -> &Path {
        &self.database_dir
    }

    /// `<root>/<database>/<category>`
    pub fn category_dir(&self, category: ObjectCategory) -> PathBuf {
        self.database_dir.join(category.dir_name())
    }

    /// `<root>/<database>/<category>/<name>.sql`
    pub fn object_path(&self, category: ObjectCategory, name: &str) -> PathBuf {
        self.category_dir(category).join(format!(
            "{}.{}",
            path_component(name),
            DEFINITION_EXTENSION
        ))
    }

    /// Creates the directory for one category, including missing parents.
    ///
    /// Succeeds without changes when the directory already exists.
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created.
    pub async fn ensure_category(&self, category: ObjectCategory) -> Result<PathBuf> {
        let dir = self.category_dir(category);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            ExportError::io(format!("Failed to create directory {}", dir.display()), e)
        })?;
        tracing::debug!("Ensured output directory {}", dir.display());
        Ok(dir)
    }
}

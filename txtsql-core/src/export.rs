//! Export sequence: for each category, create the directory, enumerate the
//! catalog, and write one file per object.
//!
//! The run is all-or-nothing. The first failing query or write aborts it,
//! and objects after the failing one are never touched. A definition is
//! fully retrieved before its file is opened, so a failed query leaves no
//! file behind for that object. The file itself is written to a staging
//! sibling and renamed into place, so a failed write leaves none either.

use crate::catalog::CatalogSource;
use crate::error::ExportError;
use crate::layout::{ExportLayout, staging_path};
use crate::models::{ExportSummary, ExportedObject, ObjectCategory, ObjectDescriptor};
use crate::script::generate_table_script;
use crate::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Progress line printed after an object's file is written.
pub fn progress_line(descriptor: &ObjectDescriptor, path: &Path) -> String {
    match descriptor.category {
        ObjectCategory::Table => format!(
            "Table script for '{}' has been exported to '{}'.",
            descriptor.name,
            path.display()
        ),
        category => format!(
            "{} {} has been exported to {}",
            category.dir_name(),
            descriptor.name,
            path.display()
        ),
    }
}

/// Writes object definitions under `<output_root>/<database>/`.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_root: PathBuf,
}

impl Exporter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Exports every table, view, stored procedure, and function.
    ///
    /// Categories run in the order tables, views, storedprocedures,
    /// functions. Each category's directory is created just before it is
    /// enumerated.
    ///
    /// # Errors
    /// Propagates the first query or filesystem error; nothing after it runs.
    pub async fn export_database<C>(&self, source: &mut C) -> Result<ExportSummary>
    where
        C: CatalogSource + ?Sized,
    {
        let database = source.database_name().await?;
        let layout = ExportLayout::new(&self.output_root, &database);
        info!(
            "Exporting {} database '{}' to {}",
            source.source_type(),
            database,
            layout.database_dir().display()
        );

        let mut summary = ExportSummary {
            database,
            exported: Vec::new(),
        };

        for category in ObjectCategory::ALL {
            let exported = self.export_category(source, &layout, category).await?;
            info!("Exported {} {} objects", exported.len(), category);
            summary.exported.extend(exported);
        }

        Ok(summary)
    }

    /// Exports all objects of one category.
    ///
    /// A name listed twice by the catalog (same name in two schemas) is
    /// exported once; later occurrences are skipped with a warning.
    ///
    /// # Errors
    /// Propagates the first query or filesystem error.
    pub async fn export_category<C>(
        &self,
        source: &mut C,
        layout: &ExportLayout,
        category: ObjectCategory,
    ) -> Result<Vec<ExportedObject>>
    where
        C: CatalogSource + ?Sized,
    {
        layout.ensure_category(category).await?;

        let names = source.list_objects(category).await?;
        let mut seen = HashSet::with_capacity(names.len());
        let mut exported = Vec::with_capacity(names.len());

        for name in names {
            if !seen.insert(name.clone()) {
                warn!(
                    "Skipping duplicate {} '{}' (same name in another schema)",
                    category, name
                );
                continue;
            }

            let descriptor = ObjectDescriptor::new(name, category);
            exported.push(self.export_object(source, layout, descriptor).await?);
        }

        Ok(exported)
    }

    /// Retrieves or synthesizes one object's definition and writes it.
    ///
    /// # Errors
    /// Returns a query error if the definition cannot be read, or an I/O
    /// error if the file cannot be written.
    pub async fn export_object<C>(
        &self,
        source: &mut C,
        layout: &ExportLayout,
        descriptor: ObjectDescriptor,
    ) -> Result<ExportedObject>
    where
        C: CatalogSource + ?Sized,
    {
        let definition = match descriptor.category {
            ObjectCategory::Table => {
                let columns = source.table_columns(&descriptor.name).await?;
                generate_table_script(&descriptor.name, &columns)
            }
            _ => source.definition_text(&descriptor.name).await?.concat(),
        };

        let path = layout.object_path(descriptor.category, &descriptor.name);
        write_definition(&path, definition.as_bytes()).await?;

        debug!("Wrote {} bytes to {}", definition.len(), path.display());
        println!("{}", progress_line(&descriptor, &path));

        Ok(ExportedObject { descriptor, path })
    }
}

/// Writes `contents` to a staging file next to `path`, then renames it over
/// `path`. On failure the staging file is removed and `path` is untouched.
async fn write_definition(path: &Path, contents: &[u8]) -> Result<()> {
    let staging = staging_path(path);

    if let Err(e) = tokio::fs::write(&staging, contents).await {
        discard_staging(&staging).await;
        return Err(ExportError::io(format!("Failed to write {}", path.display()), e));
    }

    if let Err(e) = tokio::fs::rename(&staging, path).await {
        discard_staging(&staging).await;
        return Err(ExportError::io(format!("Failed to write {}", path.display()), e));
    }

    Ok(())
}

async fn discard_staging(staging: &Path) {
    if let Err(e) = tokio::fs::remove_file(staging).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove staging file {}: {}", staging.display(), e);
    }
}

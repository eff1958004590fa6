//! `appsettings.json` loading.
//!
//! The settings file is required. Its shape:
//!
//! ```json
//! {
//!   "ConnectionStrings": {
//!     "DefaultConnection": "Server=tcp:localhost,1433;Database=Sales;User Id=sa;Password=...;TrustServerCertificate=true"
//!   },
//!   "Export": {
//!     "OutputDirectory": "./export",
//!     "ConnectTimeoutSeconds": 30
//!   }
//! }
//! ```
//!
//! The `Export` section and each of its keys are optional.

use crate::error::ExportError;
use crate::security::ConnectionString;
use crate::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up next to the executable when no path is given.
pub const SETTINGS_FILE_NAME: &str = "appsettings.json";

/// Connection string name used when none is requested explicitly.
pub const DEFAULT_CONNECTION_NAME: &str = "DefaultConnection";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Output and connection tuning read from the `Export` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ExportSettings {
    /// Root under which `<database>/<category>/` folders are created
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// Seconds allowed for TCP connect plus login
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_seconds: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ExportSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Parsed contents of `appsettings.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    #[serde(default)]
    pub connection_strings: BTreeMap<String, ConnectionString>,
    #[serde(default)]
    pub export: ExportSettings,
}

impl AppSettings {
    /// Reads and validates a settings file.
    ///
    /// # Errors
    /// - `Configuration` if the file does not exist or a value is out of range
    /// - `Io` if the file exists but cannot be read
    /// - `Serialization` if the JSON is malformed
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(ExportError::io(
                    format!("Failed to read {}", path.display()),
                    e,
                ));
            }
        };

        let settings = Self::from_json(&contents).map_err(|e| match e {
            ExportError::Serialization { source, .. } => ExportError::Serialization {
                context: format!("Malformed configuration file {}", path.display()),
                source,
            },
            other => other,
        })?;

        tracing::debug!(
            "Loaded settings from {} ({} connection strings)",
            path.display(),
            settings.connection_strings.len()
        );

        Ok(settings)
    }

    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON and `Configuration` for
    /// out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|source| ExportError::Serialization {
                context: "Malformed configuration document".to_string(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.export.connect_timeout_seconds == 0 {
            return Err(ExportError::configuration(
                "Export:ConnectTimeoutSeconds must be greater than 0",
            ));
        }

        if self.export.output_directory.as_os_str().is_empty() {
            return Err(ExportError::configuration(
                "Export:OutputDirectory cannot be empty",
            ));
        }

        Ok(())
    }

    /// Looks up a named connection string.
    ///
    /// # Errors
    /// Returns a configuration error if the entry is absent or blank.
    pub fn connection_string(&self, name: &str) -> Result<ConnectionString> {
        match self.connection_strings.get(name) {
            Some(value) if !value.is_blank() => Ok(value.clone()),
            Some(_) => Err(ExportError::configuration(format!(
                "ConnectionStrings:{} is empty",
                name
            ))),
            None => Err(ExportError::configuration(format!(
                "ConnectionStrings:{} is missing",
                name
            ))),
        }
    }
}

/// `appsettings.json` in the directory of the running executable.
///
/// # Errors
/// Returns an I/O error if the executable path cannot be determined.
pub fn default_settings_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| ExportError::io("Failed to locate the running executable", e))?;
    let base = exe.parent().map_or_else(PathBuf::new, Path::to_path_buf);
    Ok(base.join(SETTINGS_FILE_NAME))
}

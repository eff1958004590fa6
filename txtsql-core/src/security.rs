//! Connection string container with automatic memory zeroing.
//!
//! The connection string is the only secret the exporter handles. It is kept
//! in a `Zeroizing` buffer, never shown by `Debug`, and only handed out in
//! plain form to the driver that parses it.

use crate::error::redact_connection_string;
use serde::{Deserialize, Deserializer};
use std::fmt;
use zeroize::Zeroizing;

/// Connection string that zeros its memory on drop.
///
/// # Example
///
/// ```rust
/// use txtsql_core::security::ConnectionString;
///
/// let conn = ConnectionString::new("Server=db;User Id=sa;Password=secret".to_string());
/// assert!(!format!("{:?}", conn).contains("secret"));
/// assert_eq!(conn.expose(), "Server=db;User Id=sa;Password=secret");
/// ```
#[derive(Clone)]
pub struct ConnectionString(Zeroizing<String>);

impl ConnectionString {
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    /// Plain value, for the driver only. Never log it.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Sanitized form safe for logs and error messages.
    pub fn redacted(&self) -> String {
        redact_connection_string(&self.0)
    }

    /// True when the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionString")
            .field(&self.redacted())
            .finish()
    }
}

impl<'de> Deserialize<'de> for ConnectionString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

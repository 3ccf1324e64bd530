//! Error types for loading and saving cleaning specifications
//!
//! Pattern problems are never errors: they degrade to literal or disabled
//! matchers. Only the surrounding document (JSON/TOML syntax, file access)
//! can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a [`CleaningSpec`](crate::CleaningSpec)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed or produced
    #[error("invalid JSON cleaning spec: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML document could not be parsed
    #[error("invalid TOML cleaning spec: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The spec could not be rendered as TOML
    #[error("failed to render TOML cleaning spec: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// Reading or writing a cleaning config file failed
    #[error("failed to access cleaning spec '{}': {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for specification loading
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Layered error types
//!
//! The cleaning core itself cannot fail; everything here comes from the
//! stores around it or from the worker pool.

use chaptrim_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// No cleaning specification exists for a source
    #[error("no cleaning config for source '{source_name}'")]
    MissingConfig {
        /// The source that has no configuration
        source_name: String,
    },

    /// No document exists for a source
    #[error("no document for source '{source_name}'")]
    MissingDocument {
        /// The source that was requested
        source_name: String,
    },

    /// A source's configuration document could not be parsed or written
    #[error("invalid cleaning config for source '{source_name}': {error}")]
    InvalidConfig {
        /// The source whose configuration is broken
        source_name: String,
        /// The underlying parse error
        #[source]
        error: ConfigError,
    },

    /// I/O error on a store path
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path being accessed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// A store lock was poisoned by a panicking writer
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Configuration error
    #[error("invalid engine configuration: {0}")]
    ConfigError(String),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_config(source_name: &str, error: ConfigError) -> Self {
        EngineError::InvalidConfig {
            source_name: source_name.to_string(),
            error,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_display() {
        let error = EngineError::MissingConfig {
            source_name: "finance-101".to_string(),
        };
        assert_eq!(error.to_string(), "no cleaning config for source 'finance-101'");
    }

    #[test]
    fn test_io_error_display() {
        let error = EngineError::io(
            "raw/book.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = error.to_string();
        assert!(message.contains("raw/book.txt"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_invalid_config_keeps_source() {
        let parse = chaptrim_core::CleaningSpec::from_json_str("{").unwrap_err();
        let error = EngineError::invalid_config("book", parse);
        assert!(error.to_string().starts_with("invalid cleaning config for source 'book'"));
        assert!(std::error::Error::source(&error).is_some());
    }
}

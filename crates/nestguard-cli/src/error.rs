//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use nestguard_schemas::LoaderError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Schema document could not be loaded
    #[error("Schema error: {0}")]
    Schema(#[from] LoaderError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Record file that is not a JSON or YAML object
    #[error("Invalid record {}: {}", path.display(), reason)]
    InvalidRecord { path: PathBuf, reason: String },

    /// `--attribute` names an attribute the schema does not define
    #[error("Attribute '{}' is not defined in schema {}", attribute, schema.display())]
    UnknownAttribute { attribute: String, schema: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// One or more records failed validation
    #[error("Validation failed: {} error(s) in {} of {} record(s)", errors, failed, total)]
    ValidationFailed {
        errors: usize,
        failed: usize,
        total: usize,
    },

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } => 1,
            Self::Io(_) => 2,
            Self::Schema(_) => 3,
            Self::FileNotFound { .. } => 4,
            Self::InvalidRecord { .. } => 5,
            Self::Config(_) => 6,
            Self::UnknownAttribute { .. } => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::UnknownAttribute { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::ValidationFailed {
                errors: 1,
                failed: 1,
                total: 1,
            },
            Error::Io(io::Error::new(io::ErrorKind::Other, "disk")),
            Error::Schema(LoaderError::invalid_structure("<root>", "bad")),
            Error::FileNotFound {
                path: PathBuf::from("x.json"),
            },
            Error::InvalidRecord {
                path: PathBuf::from("x.json"),
                reason: "not an object".into(),
            },
            Error::config("bad"),
            Error::UnknownAttribute {
                attribute: "a".into(),
                schema: PathBuf::from("s.yaml"),
            },
            Error::other("bad"),
        ];
        let mut codes: Vec<_> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn test_validation_failed_message() {
        let err = Error::ValidationFailed {
            errors: 3,
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "Validation failed: 3 error(s) in 2 of 5 record(s)");
        assert_eq!(err.exit_code(), 1);
        assert!(!err.should_show_help());
    }

    #[test]
    fn test_format_error_without_color() {
        let err = Error::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(format_error(&err, false), "Error: File not found: missing.json");
    }
}

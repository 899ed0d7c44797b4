//! Error types for schema loading operations
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use nestguard_core::{ParseTypeError, PatternError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading a schema document and building schemas from it.
///
/// Structural errors carry a `location`: the attribute followed by the dotted
/// field path, e.g. `settings.notifications.digest`.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// The document does not have the attribute → field map shape
    #[error("Invalid schema at '{location}': {reason}")]
    InvalidStructure { location: String, reason: String },

    /// A field definition failed to deserialize
    #[error("Invalid field definition at '{location}': {source}")]
    InvalidDefinition {
        location: String,
        source: serde_json::Error,
    },

    #[error("Invalid type at '{location}': {source}")]
    InvalidType {
        location: String,
        source: ParseTypeError,
    },

    #[error("Unknown format '{name}' at '{location}'")]
    UnknownFormat { location: String, name: String },

    #[error("Invalid pattern at '{location}': {source}")]
    InvalidPattern {
        location: String,
        source: PatternError,
    },

    /// Default value rejected by the field's own types
    #[error("Invalid default at '{location}': {reason}")]
    InvalidDefault { location: String, reason: String },

    #[error("Field definitions at '{location}' exceed the maximum nesting depth of {max_depth}")]
    DepthExceeded { location: String, max_depth: usize },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    pub fn invalid_structure(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_default(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefault {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Get the file path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            _ => None,
        }
    }

    /// Get the schema location associated with this error, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::InvalidStructure { location, .. }
            | Self::InvalidDefinition { location, .. }
            | Self::InvalidType { location, .. }
            | Self::UnknownFormat { location, .. }
            | Self::InvalidPattern { location, .. }
            | Self::InvalidDefault { location, .. }
            | Self::DepthExceeded { location, .. } => Some(location),
            _ => None,
        }
    }
}

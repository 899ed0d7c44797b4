//! Validation error types
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::path::JsonPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Document key with no schema declaration; its subtree is not checked
    InvalidKey,
    /// Computed value matched none of the declared types
    InvalidType,
    /// The format capability rejected the value
    InvalidFormat,
    /// Recursion stopped at the configured depth limit
    DepthExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidKey => write!(f, "invalid_key"),
            ErrorKind::InvalidType => write!(f, "invalid_type"),
            ErrorKind::InvalidFormat => write!(f, "invalid_format"),
            ErrorKind::DepthExceeded => write!(f, "depth_exceeded"),
        }
    }
}

/// A single discrepancy between a document and its schema
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Top-level attribute being validated
    pub attribute: String,
    /// Location of the offending value below the attribute
    pub path: JsonPath,
    /// Kind-specific detail: expected types, format failure message, depth limit
    pub detail: Option<String>,
    /// Rendered human-readable message
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ValidationError {
    /// `Invalid key <context>`
    pub fn invalid_key(attribute: &str, path: JsonPath, context: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidKey,
            attribute: attribute.to_string(),
            path,
            detail: None,
            message: format!("Invalid key {}", context),
        }
    }

    /// `Invalid type at <context>, must be one of [<types>]`
    pub fn invalid_type(attribute: &str, path: JsonPath, context: &str, expected: &[String]) -> Self {
        let expected = format!("[{}]", expected.join(", "));
        Self {
            kind: ErrorKind::InvalidType,
            attribute: attribute.to_string(),
            path,
            message: format!("Invalid type at {}, must be one of {}", context, expected),
            detail: Some(expected),
        }
    }

    /// `Invalid format at <context>: <reason>`
    pub fn invalid_format(attribute: &str, path: JsonPath, context: &str, reason: String) -> Self {
        Self {
            kind: ErrorKind::InvalidFormat,
            attribute: attribute.to_string(),
            path,
            message: format!("Invalid format at {}: {}", context, reason),
            detail: Some(reason),
        }
    }

    /// `Maximum nesting depth of <n> exceeded at <context>`
    pub fn depth_exceeded(attribute: &str, path: JsonPath, context: &str, max_depth: usize) -> Self {
        Self {
            kind: ErrorKind::DepthExceeded,
            attribute: attribute.to_string(),
            path,
            detail: Some(max_depth.to_string()),
            message: format!("Maximum nesting depth of {} exceeded at {}", max_depth, context),
        }
    }
}

/// Ordered collection of validation errors, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error of another collection, preserving order
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Plain-text messages in discovery order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Errors of a single kind
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Failure reported by a format capability
#[derive(Debug, Error)]
pub enum FormatError {
    /// The value does not satisfy the format
    #[error("{0}")]
    Invalid(String),

    /// Any other failure raised while checking the format
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormatError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Unknown type name passed to `JsonType::from_str`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown type '{name}', expected one of: string, number, integer, boolean, null, object, array, any")]
pub struct ParseTypeError {
    pub name: String,
}

/// A regular expression that failed to compile
#[derive(Debug, Error)]
#[error("Invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

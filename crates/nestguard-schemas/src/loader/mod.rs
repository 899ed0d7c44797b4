//! Schema loading and parsing functionality
//!
//! This module reads declarative schema documents and builds validator
//! schemas from them:
//! - YAML and JSON parsing support
//! - Strict field definitions (unknown keys are rejected)
//! - Named formats resolved through a [`FormatRegistry`](crate::FormatRegistry)
//!
//! # Example Usage
//!
//! ```rust
//! use nestguard_schemas::loader::{Format, SchemaLoader};
//! use serde_json::{json, Value};
//!
//! let loader = SchemaLoader::<Value>::new();
//! let schemas = loader.load_str("settings:\n  theme: { type: string, format: hex_color }\n", Format::Yaml)?;
//!
//! let errors = schemas.validate(&json!({"settings": {"theme": "blue"}}));
//! assert_eq!(errors.messages(), vec!["Invalid format at settings.theme: 'blue' is not a hex color"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

pub mod definition;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use definition::{FieldDefinition, FieldMap, TypeList};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use schema_loader::{LoaderConfig, SchemaLoader};

//! Nestguard Schemas - Declarative schema documents for nestguard
//!
//! This crate builds [`nestguard_core::Schema`] trees from YAML or JSON
//! documents, so schemas can live in files next to the data they describe.
//!
//! ## Features
//!
//! - **Schema Documents**: attribute → field map definitions with nested `fields`
//! - **Constraints**: `format`, `pattern`, `enum`, numeric and length bounds
//! - **Defaults**: substituted for missing or null values and type-checked at load time
//! - **Named Formats**: a registry of built-in string formats, open to registration
//!
//! ## Quick Start
//!
//! ```rust
//! use nestguard_schemas::{loader::Format, SchemaLoader};
//! use serde_json::{json, Value};
//!
//! let schemas = SchemaLoader::<Value>::new().load_str(
//!     r#"{"settings": {"retries": {"type": "integer", "minimum": 0, "default": 3}}}"#,
//!     Format::Json,
//! )?;
//!
//! assert!(schemas.validate(&json!({"settings": {}})).is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

pub mod formats;
pub mod loader;
pub mod schema_set;

pub use formats::FormatRegistry;
pub use loader::{LoaderConfig, LoaderError, LoaderResult, SchemaLoader, SchemaParser};
pub use schema_set::SchemaSet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

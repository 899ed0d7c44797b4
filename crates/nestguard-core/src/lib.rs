//! Nestguard Core - Recursive schema-driven validation for nested documents
//!
//! This crate validates JSON-like documents of arbitrary depth against a
//! schema tree. It reports every discrepancy it finds in one pass as an
//! ordered list of errors addressed by document path.
//!
//! # Main Components
//!
//! - **Validator**: walks a document and a [`Schema`] in lockstep
//! - **Value model**: [`FieldValue`], a tagged view of the value under validation
//! - **Capabilities**: [`ValueSource`], [`TypeMatcher`] and [`Format`] traits
//!   supplied per field
//! - **Errors**: structured [`ValidationError`]s with rendered messages
//!
//! # Example
//!
//! ```rust
//! use nestguard_core::{validate_attribute, AttributePath, FieldSchema, JsonType, Schema, ValidatorConfig};
//! use serde_json::json;
//!
//! let record = json!({"settings": {"theme": 42, "extra": true}});
//! let schema = Schema::new().field(
//!     "theme",
//!     FieldSchema::new(AttributePath::new("settings", ["theme"])).with_type(JsonType::String),
//! );
//!
//! let errors = validate_attribute(&record, "settings", &schema, &ValidatorConfig::default());
//! assert_eq!(
//!     errors.messages(),
//!     vec![
//!         "Invalid type at settings.theme, must be one of [string]",
//!         "Invalid key settings.extra",
//!     ]
//! );
//! ```
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod error;
pub mod format;
pub mod path;
pub mod record;
pub mod schema;
pub mod source;
pub mod types;
pub mod validator;
pub mod value;

// Re-export commonly used types for convenience
pub use config::{PathStyle, ValidatorConfig, DEFAULT_MAX_DEPTH};
pub use error::{ErrorKind, FormatError, ParseTypeError, PatternError, ValidationError, ValidationErrors};
pub use format::{string_operand, AllOf, Format, LengthRange, NumberRange, OneOf, Pattern, SharedFormat};
pub use path::{DotPathRenderer, JsonPath, PathRenderer, PathSegment, PointerPathRenderer};
pub use record::Record;
pub use schema::{FieldSchema, Schema};
pub use source::{AttributePath, Constant, ValueSource};
pub use types::{JsonType, NamedMatcher, TypeMatcher};
pub use validator::{validate_attribute, Validator};
pub use value::FieldValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

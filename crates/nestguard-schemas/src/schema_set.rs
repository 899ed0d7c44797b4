//! Attribute-keyed collection of schemas loaded from one document
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use nestguard_core::{validate_attribute, Record, Schema, ValidationErrors, ValidatorConfig};
use std::fmt;
use tracing::debug;

/// Schemas for each attribute of a record, in declaration order
pub struct SchemaSet<R> {
    schemas: IndexMap<String, Schema<R>>,
    config: ValidatorConfig,
}

impl<R> SchemaSet<R> {
    pub fn new() -> Self {
        Self {
            schemas: IndexMap::new(),
            config: ValidatorConfig::default(),
        }
    }

    /// Use `config` for every validation run started from this set
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn insert(&mut self, attribute: impl Into<String>, schema: Schema<R>) -> Option<Schema<R>> {
        self.schemas.insert(attribute.into(), schema)
    }

    pub fn get(&self, attribute: &str) -> Option<&Schema<R>> {
        self.schemas.get(attribute)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema<R>)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<R: Record> SchemaSet<R> {
    /// Validate every attribute and concatenate the errors in declaration order
    pub fn validate(&self, record: &R) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (attribute, schema) in &self.schemas {
            errors.extend(validate_attribute(record, attribute, schema, &self.config));
        }
        debug!(attributes = self.schemas.len(), errors = errors.len(), "Validated record");
        errors
    }

    /// Validate a single attribute; `None` when the set has no schema for it
    pub fn validate_attribute(&self, record: &R, attribute: &str) -> Option<ValidationErrors> {
        self.schemas
            .get(attribute)
            .map(|schema| validate_attribute(record, attribute, schema, &self.config))
    }
}

impl<R> Default for SchemaSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for SchemaSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSet")
            .field("schemas", &self.schemas)
            .field("config", &self.config)
            .finish()
    }
}

//! Recursive validation of a document against a schema tree
//!
//! The validator walks the document and the schema in lockstep. At each
//! level it visits the union of document keys and schema keys (document keys
//! first, deduplicated), checks the key is declared, computes the field's
//! value from the record, runs the type and format checks and, when the
//! computed value is a mapping, descends into the matching document slice
//! with the field's child schema.
//!
//! Every discrepancy becomes a [`ValidationError`]; nothing short-circuits.
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::record::Record;
use crate::schema::{FieldSchema, Schema};
use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Validates one document level and everything below it
pub struct Validator<'a, R> {
    record: &'a R,
    attribute: &'a str,
    document: Option<&'a Map<String, Value>>,
    schema: Option<&'a Schema<R>>,
    parent_path: JsonPath,
    depth: usize,
    config: ValidatorConfig,
}

impl<'a, R> Validator<'a, R> {
    /// Create a validator.
    ///
    /// An absent `document` is treated as having no keys. An absent `schema`
    /// is treated as declaring no keys, so every document key at this level
    /// is reported as invalid.
    pub fn new(
        record: &'a R,
        attribute: &'a str,
        document: Option<&'a Map<String, Value>>,
        schema: Option<&'a Schema<R>>,
        parent_path: JsonPath,
    ) -> Self {
        Self {
            record,
            attribute,
            document,
            schema,
            parent_path,
            depth: 0,
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Collect every error for this level and its nested levels, in
    /// discovery order
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.validate_into(&mut errors);
        debug!(
            attribute = self.attribute,
            path = %self.parent_path,
            errors = errors.len(),
            "Validation finished"
        );
        errors
    }

    /// Document keys followed by schema-only keys
    fn validatable_keys(&self) -> IndexSet<&'a str> {
        let document_keys = self.document.into_iter().flat_map(|d| d.keys().map(String::as_str));
        let schema_keys = self.schema.into_iter().flat_map(Schema::keys);
        document_keys.chain(schema_keys).collect()
    }

    fn validate_into(&self, errors: &mut ValidationErrors) {
        let schema = self.schema;
        for key in self.validatable_keys() {
            let path = self.parent_path.child(key);
            trace!(attribute = self.attribute, path = %path, "Visiting key");

            let Some(field) = schema.and_then(|s| s.get(key)) else {
                let context = self.context(&path);
                errors.add(ValidationError::invalid_key(self.attribute, path, &context));
                continue;
            };

            self.validate_field(key, field, path, errors);
        }
    }

    fn validate_field(&self, key: &str, field: &'a FieldSchema<R>, path: JsonPath, errors: &mut ValidationErrors) {
        let value = field.compute(self.record);

        if !field.accepts(&value) {
            let context = self.context(&path);
            errors.add(ValidationError::invalid_type(
                self.attribute,
                path.clone(),
                &context,
                &field.type_names(),
            ));
        }

        if let Some(format) = field.format() {
            if let Err(failure) = format.validate(self.record, &value) {
                let context = self.context(&path);
                errors.add(ValidationError::invalid_format(
                    self.attribute,
                    path.clone(),
                    &context,
                    failure.to_string(),
                ));
            }
        }

        if !value.is_mapping() {
            return;
        }

        if self.depth >= self.config.max_depth {
            let context = self.context(&path);
            errors.add(ValidationError::depth_exceeded(
                self.attribute,
                path,
                &context,
                self.config.max_depth,
            ));
            return;
        }

        let nested = Validator {
            record: self.record,
            attribute: self.attribute,
            document: self
                .document
                .and_then(|d| d.get(key))
                .and_then(Value::as_object),
            schema: field.children(),
            parent_path: path,
            depth: self.depth + 1,
            config: self.config.clone(),
        };
        nested.validate_into(errors);
    }

    fn context(&self, path: &JsonPath) -> String {
        self.config.renderer.render(self.attribute, path)
    }
}

/// Validate the document stored in `attribute` of `record` from the root path
pub fn validate_attribute<R: Record>(
    record: &R,
    attribute: &str,
    schema: &Schema<R>,
    config: &ValidatorConfig,
) -> ValidationErrors {
    let document = record.read_attribute(attribute).and_then(Value::as_object);
    Validator::new(record, attribute, document, Some(schema), JsonPath::root())
        .with_config(config.clone())
        .validate()
}

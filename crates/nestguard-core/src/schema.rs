//! Schema nodes and field schemas
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::format::{Format, SharedFormat};
use crate::source::ValueSource;
use crate::types::TypeMatcher;
use crate::value::FieldValue;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Expected keys at one level of nesting, in declaration order
pub struct Schema<R> {
    fields: IndexMap<String, FieldSchema<R>>,
}

impl<R> Schema<R> {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Builder-style insert
    pub fn field(mut self, key: impl Into<String>, field: FieldSchema<R>) -> Self {
        self.insert(key, field);
        self
    }

    /// Declare a key, replacing any earlier declaration of the same key
    pub fn insert(&mut self, key: impl Into<String>, field: FieldSchema<R>) -> Option<FieldSchema<R>> {
        self.fields.insert(key.into(), field)
    }

    pub fn get(&self, key: &str) -> Option<&FieldSchema<R>> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema<R>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of schema levels below and including this one
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .values()
            .filter_map(FieldSchema::children)
            .map(Schema::depth)
            .max()
            .unwrap_or(0)
    }
}

impl<R> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

/// Everything known about one declared key
pub struct FieldSchema<R> {
    value: Box<dyn ValueSource<R>>,
    types: Vec<Box<dyn TypeMatcher>>,
    format: Option<SharedFormat<R>>,
    children: Option<Schema<R>>,
}

impl<R> FieldSchema<R> {
    /// A field whose value comes from `value`. With no types declared, no
    /// value is accepted.
    pub fn new(value: impl ValueSource<R> + 'static) -> Self {
        Self {
            value: Box::new(value),
            types: Vec::new(),
            format: None,
            children: None,
        }
    }

    /// Accept values matching `matcher`, in addition to the types already declared
    pub fn with_type(mut self, matcher: impl TypeMatcher + 'static) -> Self {
        self.types.push(Box::new(matcher));
        self
    }

    pub fn with_types<M, I>(mut self, matchers: I) -> Self
    where
        M: TypeMatcher + 'static,
        I: IntoIterator<Item = M>,
    {
        self.types
            .extend(matchers.into_iter().map(|m| Box::new(m) as Box<dyn TypeMatcher>));
        self
    }

    pub fn with_format(self, format: impl Format<R> + 'static) -> Self {
        self.with_shared_format(Arc::new(format))
    }

    /// Use a format shared with other fields
    pub fn with_shared_format(mut self, format: SharedFormat<R>) -> Self {
        self.format = Some(format);
        self
    }

    /// Describe the keys of a nested object
    pub fn with_children(mut self, children: Schema<R>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn compute(&self, record: &R) -> FieldValue {
        self.value.compute(record)
    }

    /// True when at least one declared type matches
    pub fn accepts(&self, value: &FieldValue) -> bool {
        self.types.iter().any(|t| t.matches(value))
    }

    /// Names of the declared types, in declaration order
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name().into_owned()).collect()
    }

    pub fn format(&self) -> Option<&dyn Format<R>> {
        self.format.as_deref()
    }

    pub fn children(&self) -> Option<&Schema<R>> {
        self.children.as_ref()
    }
}

impl<R> fmt::Debug for FieldSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("types", &self.type_names())
            .field("format", &self.format.is_some())
            .field("children", &self.children)
            .finish()
    }
}

//! Value capabilities: how a field's value is computed from the record
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::record::Record;
use crate::value::FieldValue;
use serde_json::Value;

/// Computes the value a field is validated against.
///
/// Implementations must be deterministic and side-effect free. The computed
/// value need not be the raw document entry, which lets derived or virtual
/// fields go through the same checks.
pub trait ValueSource<R: ?Sized>: Send + Sync {
    fn compute(&self, record: &R) -> FieldValue;
}

impl<R: ?Sized, F> ValueSource<R> for F
where
    F: Fn(&R) -> FieldValue + Send + Sync,
{
    fn compute(&self, record: &R) -> FieldValue {
        self(record)
    }
}

/// Always yields the same value
#[derive(Debug, Clone, PartialEq)]
pub struct Constant(pub FieldValue);

impl Constant {
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self(value.into())
    }
}

impl<R: ?Sized> ValueSource<R> for Constant {
    fn compute(&self, _record: &R) -> FieldValue {
        self.0.clone()
    }
}

/// Reads a value at a key path below a record attribute.
///
/// When the stored value is missing or null and a default is configured, the
/// default is returned instead. Defaults of enclosing objects are inherited:
/// if an ancestor is missing or null, the rest of the path is read from that
/// ancestor's default.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePath {
    attribute: String,
    keys: Vec<String>,
    default: Option<Value>,
    inherited: Vec<(usize, Value)>,
}

impl AttributePath {
    pub fn new<A, I, K>(attribute: A, keys: I) -> Self
    where
        A: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            attribute: attribute.into(),
            keys: keys.into_iter().map(Into::into).collect(),
            default: None,
            inherited: Vec::new(),
        }
    }

    /// Set the value used when the stored value is missing or null
    pub fn with_default(mut self, default: Option<Value>) -> Self {
        self.default = default;
        self
    }

    /// Substitute `default` for the ancestor reached after `depth` keys when
    /// that ancestor is missing or null
    pub fn with_inherited_default(mut self, depth: usize, default: Value) -> Self {
        self.inherited.retain(|(d, _)| *d != depth);
        self.inherited.push((depth, default));
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn or_inherited<'a>(&'a self, value: Option<&'a Value>, depth: usize) -> Option<&'a Value> {
        match value {
            Some(Value::Null) | None => self
                .inherited
                .iter()
                .find(|(d, _)| *d == depth)
                .map(|(_, default)| default)
                .or(value),
            Some(_) => value,
        }
    }
}

impl<R: Record + ?Sized> ValueSource<R> for AttributePath {
    fn compute(&self, record: &R) -> FieldValue {
        let mut current = record.read_attribute(&self.attribute);
        for (depth, key) in self.keys.iter().enumerate() {
            current = self
                .or_inherited(current, depth)
                .and_then(Value::as_object)
                .and_then(|map| map.get(key));
        }

        match current {
            Some(Value::Null) | None => FieldValue::from_option(self.default.as_ref()),
            Some(value) => FieldValue::from(value.clone()),
        }
    }
}

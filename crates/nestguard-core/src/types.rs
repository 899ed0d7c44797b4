//! Type matchers
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::error::ParseTypeError;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Predicate deciding whether a value conforms to one acceptable type.
///
/// A field's matchers are combined with logical OR. Matchers are trusted and
/// must not panic.
pub trait TypeMatcher: Send + Sync {
    fn matches(&self, value: &FieldValue) -> bool;

    /// Name shown in `Invalid type` messages
    fn name(&self) -> Cow<'_, str>;
}

/// The JSON value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    String,
    Number,
    /// Numbers without a fractional part
    Integer,
    Boolean,
    /// Explicit null, or no value at all
    Null,
    Object,
    Array,
    /// Matches every value, including absence
    Any,
}

impl JsonType {
    pub const ALL: [JsonType; 8] = [
        JsonType::String,
        JsonType::Number,
        JsonType::Integer,
        JsonType::Boolean,
        JsonType::Null,
        JsonType::Object,
        JsonType::Array,
        JsonType::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Any => "any",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTypeError { name: s.to_string() })
    }
}

impl TypeMatcher for JsonType {
    fn matches(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (JsonType::Any, _) => true,
            (JsonType::Null, v) => v.is_null_like(),
            (JsonType::String, FieldValue::Scalar(Value::String(_))) => true,
            (JsonType::Number, FieldValue::Scalar(Value::Number(_))) => true,
            (JsonType::Integer, FieldValue::Scalar(Value::Number(n))) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            (JsonType::Boolean, FieldValue::Scalar(Value::Bool(_))) => true,
            (JsonType::Object, FieldValue::Mapping(_)) => true,
            (JsonType::Array, FieldValue::List(_)) => true,
            _ => false,
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Predicate-backed matcher reported under a custom type name
pub struct NamedMatcher<F> {
    name: String,
    predicate: F,
}

impl<F> NamedMatcher<F>
where
    F: Fn(&FieldValue) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> TypeMatcher for NamedMatcher<F>
where
    F: Fn(&FieldValue) -> bool + Send + Sync,
{
    fn matches(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

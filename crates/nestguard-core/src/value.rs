//! Tagged value model for the values under validation
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// A value computed for a schema field.
///
/// Recursion into nested objects is decided by matching on
/// [`FieldValue::Mapping`]; lists are opaque leaves.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value could be computed (missing key, missing attribute)
    #[default]
    Absent,
    /// Null, boolean, number or string
    Scalar(Value),
    /// An array, never validated element by element
    List(Vec<Value>),
    /// A nested object
    Mapping(Map<String, Value>),
}

impl FieldValue {
    /// Build a field value from an optional JSON value, treating `None` as absent
    pub fn from_option(value: Option<&Value>) -> Self {
        value.cloned().map(Self::from).unwrap_or(Self::Absent)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True for `Absent` and for an explicit JSON null
    pub fn is_null_like(&self) -> bool {
        matches!(self, Self::Absent | Self::Scalar(Value::Null))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Short type label used in format failure messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Scalar(Value::Null) => "null",
            Self::Scalar(Value::Bool(_)) => "boolean",
            Self::Scalar(Value::Number(_)) => "number",
            Self::Scalar(Value::String(_)) => "string",
            // Arrays and objects never end up in `Scalar` through `From<Value>`
            Self::Scalar(_) | Self::List(_) => "array",
            Self::Mapping(_) => "object",
        }
    }

    /// Convert back into a JSON value; `Absent` becomes `null`
    pub fn to_json(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Scalar(value) => value.clone(),
            Self::List(items) => Value::Array(items.clone()),
            Self::Mapping(map) => Value::Object(map.clone()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(map) => Self::Mapping(map),
            scalar => Self::Scalar(scalar),
        }
    }
}

impl From<Option<Value>> for FieldValue {
    fn from(value: Option<Value>) -> Self {
        value.map(Self::from).unwrap_or(Self::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_tags_variants() {
        assert!(matches!(FieldValue::from(json!("x")), FieldValue::Scalar(_)));
        assert!(matches!(FieldValue::from(json!(null)), FieldValue::Scalar(Value::Null)));
        assert!(matches!(FieldValue::from(json!([1, 2])), FieldValue::List(_)));
        assert!(FieldValue::from(json!({"a": 1})).is_mapping());
        assert!(FieldValue::from_option(None).is_absent());
    }

    #[test]
    fn test_null_like() {
        assert!(FieldValue::Absent.is_null_like());
        assert!(FieldValue::from(json!(null)).is_null_like());
        assert!(!FieldValue::from(json!(0)).is_null_like());
    }

    #[test]
    fn test_to_json_round_trip_for_absent() {
        assert_eq!(FieldValue::Absent.to_json(), Value::Null);
        assert_eq!(FieldValue::from(json!({"a": [1]})).to_json(), json!({"a": [1]}));
    }
}

//! Serde model of a declarative schema document
//!
//! A document maps attribute names to field maps; each field map maps keys to
//! [`FieldDefinition`]s, which may nest further field maps under `fields`.
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered field key → definition map
pub type FieldMap = IndexMap<String, FieldDefinition>;

/// Declared type: a single name or a list of names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeList {
    One(String),
    Many(Vec<String>),
}

impl TypeList {
    pub fn names(&self) -> Vec<&str> {
        match self {
            TypeList::One(name) => vec![name.as_str()],
            TypeList::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// One field of a schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub types: TypeList,

    /// Name of a registered format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Used when the stored value is missing or null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Nested fields, allowed only for object-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_and_list_types() {
        let single: FieldDefinition = serde_json::from_value(json!({"type": "string"})).unwrap();
        assert_eq!(single.types.names(), vec!["string"]);

        let many: FieldDefinition = serde_json::from_value(json!({"type": ["string", "null"]})).unwrap();
        assert_eq!(many.types.names(), vec!["string", "null"]);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<FieldDefinition, _> =
            serde_json::from_value(json!({"type": "string", "colour": "red"}));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field `colour`"), "{err}");
    }

    #[test]
    fn test_type_is_required() {
        let result: Result<FieldDefinition, _> = serde_json::from_value(json!({"format": "email"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_fields_keep_order() {
        let def: FieldDefinition = serde_json::from_value(json!({
            "type": "object",
            "fields": {"zeta": {"type": "number"}, "alpha": {"type": "string"}}
        }))
        .unwrap();
        let keys: Vec<_> = def.fields.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}

//! Property-based tests for the recursive validator
//!
//! These tests verify that validation behaves consistently across randomly
//! generated nested documents.

use nestguard_core::{validate_attribute, AttributePath, ErrorKind, FieldSchema, JsonType, Schema, ValidatorConfig};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,  // max depth
        32, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z]{1,8}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating a document root (always an object)
fn document_strategy() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::hash_map("[a-z]{1,8}", json_value_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

fn type_of(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(_) => JsonType::Number,
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}

/// Build a schema that the given document satisfies exactly
fn schema_for(document: &Map<String, Value>, prefix: &[String]) -> Schema<Value> {
    let mut schema = Schema::new();
    for (key, value) in document {
        let mut keys = prefix.to_vec();
        keys.push(key.clone());
        let mut field = FieldSchema::new(AttributePath::new("doc", keys.clone())).with_type(type_of(value));
        if let Value::Object(nested) = value {
            field = field.with_children(schema_for(nested, &keys));
        }
        schema.insert(key.clone(), field);
    }
    schema
}

proptest! {
    #[test]
    fn prop_mirrored_schema_accepts_document(document in document_strategy()) {
        let schema = schema_for(&document, &[]);
        let record = json!({"doc": Value::Object(document)});
        let errors = validate_attribute(&record, "doc", &schema, &ValidatorConfig::default());
        prop_assert!(errors.is_empty(), "unexpected errors: {:?}", errors.messages());
    }

    #[test]
    fn prop_unknown_top_level_key_yields_one_invalid_key(
        document in document_strategy(),
        extra in json_value_strategy(),
    ) {
        let schema = schema_for(&document, &[]);
        let mut with_extra = document.clone();
        // Uppercase keys never collide with generated lowercase keys
        with_extra.insert("UNKNOWN".to_string(), extra);
        let record = json!({"doc": Value::Object(with_extra)});

        let errors = validate_attribute(&record, "doc", &schema, &ValidatorConfig::default());
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.as_slice()[0].kind, ErrorKind::InvalidKey);
        prop_assert_eq!(errors.as_slice()[0].message.as_str(), "Invalid key doc.UNKNOWN");
    }

    #[test]
    fn prop_validation_is_deterministic(
        schema_source in document_strategy(),
        document in document_strategy(),
    ) {
        let schema = schema_for(&schema_source, &[]);
        let record = json!({"doc": Value::Object(document)});
        let first = validate_attribute(&record, "doc", &schema, &ValidatorConfig::default());
        let second = validate_attribute(&record, "doc", &schema, &ValidatorConfig::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_empty_schema_rejects_each_top_level_key(document in document_strategy()) {
        let schema: Schema<Value> = Schema::new();
        let expected = document.len();
        let record = json!({"doc": Value::Object(document)});
        let errors = validate_attribute(&record, "doc", &schema, &ValidatorConfig::default());
        prop_assert_eq!(errors.len(), expected);
        prop_assert!(errors.iter().all(|e| e.kind == ErrorKind::InvalidKey));
    }
}

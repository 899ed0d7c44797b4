//! Builds validator schemas from declarative schema documents
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::formats::FormatRegistry;
use crate::loader::{
    definition::{FieldDefinition, FieldMap},
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
};
use crate::schema_set::SchemaSet;
use nestguard_core::{
    AllOf, AttributePath, FieldSchema, FieldValue, JsonType, LengthRange, NumberRange, OneOf, Pattern, Record,
    Schema, SharedFormat, TypeMatcher, DEFAULT_MAX_DEPTH,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Configuration for schema loader behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Deepest level of nested `fields` accepted in a definition
    pub max_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Turns schema documents into a [`SchemaSet`].
///
/// Each field reads its value from the record with an [`AttributePath`] built
/// from the attribute name and the field's key path.
#[derive(Debug)]
pub struct SchemaLoader<R> {
    config: LoaderConfig,
    formats: FormatRegistry<R>,
    parser: SchemaParser,
}

impl<R: Record + 'static> Default for SchemaLoader<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + 'static> SchemaLoader<R> {
    /// Create a loader with default configuration and the built-in formats
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            formats: FormatRegistry::with_builtins(),
            parser: SchemaParser::new(),
        }
    }

    /// Replace the format registry
    pub fn with_formats(mut self, formats: FormatRegistry<R>) -> Self {
        self.formats = formats;
        self
    }

    pub fn formats_mut(&mut self) -> &mut FormatRegistry<R> {
        &mut self.formats
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a schema document from file, detecting format from extension
    pub fn load_file(&self, path: &Path) -> LoaderResult<SchemaSet<R>> {
        let value = self.parser.parse_file(path)?;
        let set = self.load_value(value)?;
        debug!(path = %path.display(), attributes = set.len(), "Loaded schema");
        Ok(set)
    }

    /// Load a schema document from a string
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<SchemaSet<R>> {
        let value = self.parser.parse_content(content, format, Path::new("<inline>"))?;
        self.load_value(value)
    }

    /// Build schemas from an already parsed document
    pub fn load_value(&self, value: Value) -> LoaderResult<SchemaSet<R>> {
        let Value::Object(attributes) = value else {
            return Err(LoaderError::invalid_structure(
                "<root>",
                "expected a mapping of attribute names to field maps",
            ));
        };

        let mut set = SchemaSet::new();
        for (attribute, fields) in attributes {
            let fields: FieldMap = serde_json::from_value(fields).map_err(|source| LoaderError::InvalidDefinition {
                location: attribute.clone(),
                source,
            })?;
            let schema = self.build_schema(&attribute, &[], &fields, &[], 1)?;
            debug!(attribute = %attribute, fields = schema.len(), "Built attribute schema");
            set.insert(attribute, schema);
        }
        Ok(set)
    }

    fn build_schema(
        &self,
        attribute: &str,
        prefix: &[String],
        fields: &FieldMap,
        inherited: &[(usize, Value)],
        depth: usize,
    ) -> LoaderResult<Schema<R>> {
        if depth > self.config.max_depth {
            return Err(LoaderError::DepthExceeded {
                location: location(attribute, prefix),
                max_depth: self.config.max_depth,
            });
        }

        let mut schema = Schema::new();
        for (key, definition) in fields {
            let mut keys = prefix.to_vec();
            keys.push(key.clone());
            let field = self.build_field(attribute, &keys, definition, inherited, depth)?;
            schema.insert(key.clone(), field);
        }
        Ok(schema)
    }

    fn build_field(
        &self,
        attribute: &str,
        keys: &[String],
        definition: &FieldDefinition,
        inherited: &[(usize, Value)],
        depth: usize,
    ) -> LoaderResult<FieldSchema<R>> {
        let location = location(attribute, keys);

        let types = definition
            .types
            .names()
            .into_iter()
            .map(|name| {
                name.parse::<JsonType>().map_err(|source| LoaderError::InvalidType {
                    location: location.clone(),
                    source,
                })
            })
            .collect::<LoaderResult<Vec<_>>>()?;
        if types.is_empty() {
            return Err(LoaderError::invalid_structure(&location, "type list must not be empty"));
        }

        if let Some(default) = &definition.default {
            let value = FieldValue::from(default.clone());
            if !types.iter().any(|t| t.matches(&value)) {
                let names: Vec<_> = types.iter().map(JsonType::as_str).collect();
                return Err(LoaderError::invalid_default(
                    &location,
                    format!("{} does not match [{}]", value.kind(), names.join(", ")),
                ));
            }
        }

        if definition.fields.is_some() && !types.contains(&JsonType::Object) {
            return Err(LoaderError::invalid_structure(
                &location,
                "`fields` is only allowed on object fields",
            ));
        }

        // Read through ancestor defaults when an enclosing object is missing
        let source = inherited.iter().cloned().fold(
            AttributePath::new(attribute, keys.iter().cloned()).with_default(definition.default.clone()),
            |source, (depth, default)| source.with_inherited_default(depth, default),
        );
        let mut field = FieldSchema::new(source).with_types(types);

        if let Some(format) = self.build_format(&location, definition)? {
            field = field.with_shared_format(format);
        }
        if let Some(children) = &definition.fields {
            let mut child_inherited = inherited.to_vec();
            if let Some(default) = &definition.default {
                child_inherited.push((keys.len(), default.clone()));
            }
            field = field.with_children(self.build_schema(attribute, keys, children, &child_inherited, depth + 1)?);
        }
        Ok(field)
    }

    /// Combine the field's constraints: named format, pattern, enum, range, length
    fn build_format(&self, location: &str, definition: &FieldDefinition) -> LoaderResult<Option<SharedFormat<R>>> {
        let mut formats: Vec<SharedFormat<R>> = Vec::new();

        if let Some(name) = &definition.format {
            let format = self.formats.get(name).ok_or_else(|| LoaderError::UnknownFormat {
                location: location.to_string(),
                name: name.clone(),
            })?;
            formats.push(format);
        }

        if let Some(pattern) = &definition.pattern {
            let pattern = Pattern::new(pattern).map_err(|source| LoaderError::InvalidPattern {
                location: location.to_string(),
                source,
            })?;
            formats.push(Arc::new(pattern));
        }

        if let Some(allowed) = &definition.allowed {
            formats.push(Arc::new(OneOf::new(allowed.iter().cloned())));
        }

        if definition.minimum.is_some() || definition.maximum.is_some() {
            if let (Some(min), Some(max)) = (definition.minimum, definition.maximum) {
                if min > max {
                    return Err(LoaderError::invalid_structure(location, "minimum is greater than maximum"));
                }
            }
            formats.push(Arc::new(NumberRange::new(definition.minimum, definition.maximum)));
        }

        if definition.min_length.is_some() || definition.max_length.is_some() {
            if let (Some(min), Some(max)) = (definition.min_length, definition.max_length) {
                if min > max {
                    return Err(LoaderError::invalid_structure(
                        location,
                        "min_length is greater than max_length",
                    ));
                }
            }
            formats.push(Arc::new(LengthRange::new(definition.min_length, definition.max_length)));
        }

        Ok(match formats.len() {
            0 | 1 => formats.pop(),
            _ => Some(Arc::new(AllOf::new(formats)) as SharedFormat<R>),
        })
    }
}

fn location(attribute: &str, keys: &[String]) -> String {
    std::iter::once(attribute)
        .chain(keys.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn loader() -> SchemaLoader<Value> {
        SchemaLoader::new()
    }

    #[test]
    fn test_location() {
        assert_eq!(location("settings", &[]), "settings");
        assert_eq!(location("settings", &["a".into(), "b".into()]), "settings.a.b");
    }

    #[test]
    fn test_builds_nested_schema_in_order() {
        let set = loader()
            .load_value(json!({
                "settings": {
                    "theme": {"type": "string"},
                    "notifications": {
                        "type": "object",
                        "fields": {"email": {"type": "boolean"}}
                    }
                }
            }))
            .unwrap();

        let schema = set.get("settings").unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["theme", "notifications"]);
        let nested = schema.get("notifications").unwrap().children().unwrap();
        assert!(nested.contains_key("email"));
        assert_eq!(schema.depth(), 2);
    }

    #[test]
    fn test_rejects_root_that_is_not_a_mapping() {
        let err = loader().load_value(json!(["settings"])).unwrap_err();
        assert_eq!(err.location(), Some("<root>"));
    }

    #[test]
    fn test_rejects_unknown_type_name() {
        let err = loader()
            .load_value(json!({"settings": {"theme": {"type": "colour"}}}))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidType { .. }));
        assert_eq!(err.location(), Some("settings.theme"));
    }

    #[test]
    fn test_rejects_empty_type_list() {
        let err = loader()
            .load_value(json!({"settings": {"theme": {"type": []}}}))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidStructure { .. }));
    }

    #[test]
    fn test_rejects_fields_on_non_object() {
        let err = loader()
            .load_value(json!({"settings": {"theme": {"type": "string", "fields": {}}}}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid schema at 'settings.theme': `fields` is only allowed on object fields"
        );
    }

    #[test]
    fn test_rejects_default_of_wrong_type() {
        let err = loader()
            .load_value(json!({"settings": {"retries": {"type": "integer", "default": "three"}}}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid default at 'settings.retries': string does not match [integer]"
        );
    }

    #[test]
    fn test_rejects_unknown_format_and_bad_pattern() {
        let err = loader()
            .load_value(json!({"settings": {"a": {"type": "string", "format": "postcode"}}}))
            .unwrap_err();
        assert!(matches!(err, LoaderError::UnknownFormat { ref name, .. } if name == "postcode"));

        let err = loader()
            .load_value(json!({"settings": {"a": {"type": "string", "pattern": "("}}}))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = loader()
            .load_value(json!({"settings": {"a": {"type": "number", "minimum": 5, "maximum": 1}}}))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidStructure { .. }));
    }

    #[test]
    fn test_definition_depth_limit() {
        let loader = SchemaLoader::<Value>::with_config(LoaderConfig { max_depth: 1 });
        let err = loader
            .load_value(json!({
                "settings": {"a": {"type": "object", "fields": {"b": {"type": "string"}}}}
            }))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field definitions at 'settings.a' exceed the maximum nesting depth of 1"
        );
    }

    #[test]
    fn test_object_default_reaches_children() {
        let set = loader()
            .load_value(json!({
                "settings": {
                    "notifications": {
                        "type": "object",
                        "default": {"email": true},
                        "fields": {"email": {"type": "boolean"}}
                    }
                }
            }))
            .unwrap();

        assert!(set.validate(&json!({"settings": {}})).is_empty());
        assert!(set.validate(&json!({"settings": {"notifications": null}})).is_empty());
        assert_eq!(
            set.validate(&json!({"settings": {"notifications": {}}})).messages(),
            vec!["Invalid type at settings.notifications.email, must be one of [boolean]"]
        );
    }

    #[test]
    fn test_single_constraint_is_not_wrapped() {
        let set = loader()
            .load_value(json!({"settings": {"a": {"type": "string", "enum": ["x"]}}}))
            .unwrap();
        let field = set.get("settings").unwrap().get("a").unwrap();
        assert!(field.format().is_some());
    }
}

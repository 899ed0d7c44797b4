//! Integration tests for loading schema documents and validating records

use nestguard_core::{ErrorKind, FieldValue, FormatError, PathStyle, ValidatorConfig};
use nestguard_schemas::loader::Format;
use nestguard_schemas::{FormatRegistry, LoaderConfig, LoaderError, SchemaLoader};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const SETTINGS_YAML: &str = r##"
settings:
  theme:
    type: [string, "null"]
    format: hex_color
    default: "#ffffff"
  notifications:
    type: object
    fields:
      email: { type: boolean, default: true }
      digest: { type: string, enum: [daily, weekly] }
  tags:
    type: array
    max_length: 3
"##;

fn write_schema(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_yaml_file_and_validate_clean_record() {
    let dir = TempDir::new().unwrap();
    let path = write_schema(&dir, "settings.yaml", SETTINGS_YAML);

    let schemas = SchemaLoader::<Value>::new().load_file(&path).unwrap();
    assert_eq!(schemas.attributes().collect::<Vec<_>>(), vec!["settings"]);

    let record = json!({
        "settings": {
            "theme": "#112233",
            "notifications": {"email": false, "digest": "daily"},
            "tags": ["a", "b"]
        }
    });
    assert!(schemas.validate(&record).is_empty());
}

#[test]
fn test_defaults_fill_missing_values() {
    let schemas = SchemaLoader::<Value>::new().load_str(SETTINGS_YAML, Format::Yaml).unwrap();

    // theme falls back to "#ffffff"; email falls back to true; digest has no default
    let record = json!({"settings": {"notifications": {}}});
    let errors = schemas.validate(&record);
    assert_eq!(
        errors.messages(),
        vec![
            "Invalid type at settings.notifications.digest, must be one of [string]",
            "Invalid type at settings.tags, must be one of [array]",
        ]
    );
}

#[test]
fn test_reports_every_problem_in_document_order() {
    let schemas = SchemaLoader::<Value>::new().load_str(SETTINGS_YAML, Format::Yaml).unwrap();

    let record = json!({
        "settings": {
            "colour": "red",
            "theme": "blue",
            "notifications": {"email": "yes", "digest": "hourly", "sms": true},
            "tags": ["a", "b", "c", "d"]
        }
    });
    let errors = schemas.validate(&record);
    assert_eq!(
        errors.messages(),
        vec![
            "Invalid key settings.colour",
            "Invalid format at settings.theme: 'blue' is not a hex color",
            "Invalid type at settings.notifications.email, must be one of [boolean]",
            "Invalid format at settings.notifications.digest: \"hourly\" is not one of: \"daily\", \"weekly\"",
            "Invalid key settings.notifications.sms",
            "Invalid format at settings.tags: length 4 is longer than 3",
        ]
    );
    assert_eq!(errors.of_kind(ErrorKind::InvalidKey).count(), 2);
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_schema(
        &dir,
        "profile.json",
        r#"{"profile": {"email": {"type": "string", "format": "email"}, "age": {"type": "integer", "minimum": 0}}}"#,
    );

    let schemas = SchemaLoader::<Value>::new().load_file(&path).unwrap();
    let errors = schemas.validate(&json!({"profile": {"email": "ops@example.com", "age": -1}}));
    assert_eq!(errors.messages(), vec!["Invalid format at profile.age: -1 must be at least 0"]);
}

#[test]
fn test_file_errors() {
    let dir = TempDir::new().unwrap();
    let loader = SchemaLoader::<Value>::new();

    let err = loader.load_file(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, LoaderError::IoError { .. }));

    let path = write_schema(&dir, "schema.toml", "settings = 1");
    let err = loader.load_file(&path).unwrap_err();
    assert!(matches!(err, LoaderError::UnsupportedFormat { .. }));

    let path = write_schema(&dir, "broken.json", "{");
    let err = loader.load_file(&path).unwrap_err();
    assert!(matches!(err, LoaderError::JsonParseError { .. }));
}

#[test]
fn test_unknown_definition_key_names_attribute() {
    let err = SchemaLoader::<Value>::new()
        .load_str("settings:\n  theme: { type: string, colour: red }\n", Format::Yaml)
        .unwrap_err();
    assert!(matches!(err, LoaderError::InvalidDefinition { .. }));
    assert_eq!(err.location(), Some("settings"));
    assert!(err.to_string().contains("unknown field `colour`"), "{err}");
}

#[test]
fn test_combined_constraints_report_first_failure() {
    let schemas = SchemaLoader::<Value>::new()
        .load_str(
            r#"{"account": {"code": {"type": "string", "format": "non_blank", "pattern": "^[A-Z]+$", "max_length": 4}}}"#,
            Format::Json,
        )
        .unwrap();

    let messages = |code: Value| schemas.validate(&json!({"account": {"code": code}})).messages();
    assert_eq!(messages(json!("  ")), vec!["Invalid format at account.code: must not be blank"]);
    assert_eq!(
        messages(json!("abc")),
        vec!["Invalid format at account.code: 'abc' does not match pattern ^[A-Z]+$"]
    );
    assert_eq!(
        messages(json!("ABCDE")),
        vec!["Invalid format at account.code: length 5 is longer than 4"]
    );
    assert!(messages(json!("ABCD")).is_empty());
}

#[test]
fn test_registered_format_sees_whole_record() {
    let mut formats = FormatRegistry::<Value>::with_builtins();
    formats.register("matches_region", |record: &Value, value: &FieldValue| -> Result<(), FormatError> {
        let region = record["profile"]["region"].as_str().unwrap_or_default();
        match value.as_str() {
            Some(currency) if region == "eu" && currency != "EUR" => {
                Err(FormatError::invalid(format!("{currency} is not used in region {region}")))
            }
            _ => Ok(()),
        }
    });

    let schemas = SchemaLoader::new()
        .with_formats(formats)
        .load_str(
            "billing:\n  currency: { type: string, format: matches_region }\n",
            Format::Yaml,
        )
        .unwrap();

    let record = json!({"profile": {"region": "eu"}, "billing": {"currency": "USD"}});
    assert_eq!(
        schemas.validate(&record).messages(),
        vec!["Invalid format at billing.currency: USD is not used in region eu"]
    );
}

#[test]
fn test_validator_config_and_loader_config() {
    let schemas = SchemaLoader::<Value>::with_config(LoaderConfig { max_depth: 8 })
        .load_str(SETTINGS_YAML, Format::Yaml)
        .unwrap()
        .with_config(ValidatorConfig::default().with_path_style(PathStyle::Pointer));

    let errors = schemas.validate(&json!({"settings": {"notifications": {"digest": "daily", "push": 1}, "tags": []}}));
    assert_eq!(errors.messages(), vec!["Invalid key settings/notifications/push"]);
}

#[test]
fn test_multiple_attributes_validate_in_declaration_order() {
    let schemas = SchemaLoader::<Value>::new()
        .load_str(
            "b_attr:\n  x: { type: string }\na_attr:\n  y: { type: string }\n",
            Format::Yaml,
        )
        .unwrap();
    let errors = schemas.validate(&json!({"a_attr": {"y": 1}, "b_attr": {"x": 1}}));
    assert_eq!(
        errors.messages(),
        vec![
            "Invalid type at b_attr.x, must be one of [string]",
            "Invalid type at a_attr.y, must be one of [string]",
        ]
    );
}

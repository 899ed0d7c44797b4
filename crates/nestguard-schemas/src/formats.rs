//! Named formats referenced from schema documents
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use nestguard_core::{string_operand, FieldValue, Format, FormatError, SharedFormat};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use url::Url;

/// String check backing a built-in format; null and absent values pass
#[derive(Clone, Copy)]
struct StringFormat {
    check: fn(&str) -> Result<(), String>,
}

impl<R: ?Sized> Format<R> for StringFormat {
    fn validate(&self, _record: &R, value: &FieldValue) -> Result<(), FormatError> {
        match string_operand(value)? {
            Some(s) => (self.check)(s).map_err(FormatError::Invalid),
            None => Ok(()),
        }
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn email(s: &str) -> Result<(), String> {
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles")
    });
    if regex.is_match(s) {
        Ok(())
    } else {
        Err(format!("'{s}' is not a valid email address"))
    }
}

fn hex_color(s: &str) -> Result<(), String> {
    let regex = HEX_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("hex color pattern compiles")
    });
    if regex.is_match(s) {
        Ok(())
    } else {
        Err(format!("'{s}' is not a hex color"))
    }
}

fn uuid(s: &str) -> Result<(), String> {
    uuid::Uuid::parse_str(s)
        .map(|_| ())
        .map_err(|e| format!("'{s}' is not a valid UUID: {e}"))
}

fn date(s: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| format!("'{s}' is not a valid date (YYYY-MM-DD): {e}"))
}

fn date_time(s: &str) -> Result<(), String> {
    DateTime::parse_from_rfc3339(s)
        .map(|_| ())
        .map_err(|e| format!("'{s}' is not a valid RFC 3339 date-time: {e}"))
}

fn uri(s: &str) -> Result<(), String> {
    Url::parse(s)
        .map(|_| ())
        .map_err(|e| format!("'{s}' is not a valid URI: {e}"))
}

fn non_blank(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        Err("must not be blank".to_string())
    } else {
        Ok(())
    }
}

const BUILTINS: &[(&str, fn(&str) -> Result<(), String>)] = &[
    ("email", email),
    ("hex_color", hex_color),
    ("uuid", uuid),
    ("date", date),
    ("date_time", date_time),
    ("uri", uri),
    ("non_blank", non_blank),
];

/// Registry of formats addressable by name from schema documents
pub struct FormatRegistry<R> {
    formats: IndexMap<String, SharedFormat<R>>,
}

impl<R> FormatRegistry<R> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            formats: IndexMap::new(),
        }
    }

    /// Create a registry holding the built-in string formats
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, check) in BUILTINS {
            registry.register(*name, StringFormat { check: *check });
        }
        registry
    }

    /// Register a format, replacing any format with the same name
    pub fn register(&mut self, name: impl Into<String>, format: impl Format<R> + 'static) -> &mut Self {
        self.register_shared(name, Arc::new(format))
    }

    pub fn register_shared(&mut self, name: impl Into<String>, format: SharedFormat<R>) -> &mut Self {
        self.formats.insert(name.into(), format);
        self
    }

    pub fn get(&self, name: &str) -> Option<SharedFormat<R>> {
        self.formats.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }
}

impl<R> Default for FormatRegistry<R> {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl<R> Clone for FormatRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            formats: self.formats.clone(),
        }
    }
}

impl<R> fmt::Debug for FormatRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn check(name: &str, value: Value) -> Result<(), FormatError> {
        let registry = FormatRegistry::<Value>::with_builtins();
        let format = registry.get(name).unwrap();
        format.validate(&Value::Null, &FieldValue::from(value))
    }

    #[test]
    fn test_builtin_names() {
        let registry = FormatRegistry::<Value>::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["email", "hex_color", "uuid", "date", "date_time", "uri", "non_blank"]
        );
        assert!(FormatRegistry::<Value>::new().names().next().is_none());
    }

    #[test]
    fn test_email() {
        assert!(check("email", json!("ops@example.com")).is_ok());
        assert!(check("email", json!("ops@localhost")).is_err());
        assert!(check("email", json!("ops example.com")).is_err());
        assert!(check("email", json!("@example.com")).is_err());
        assert!(check("email", json!("ops@@example.com")).is_err());
        assert!(check("email", json!("ops@example.com.")).is_err());
        assert!(check("email", json!("first.last+tag@mail.example.org")).is_ok());
        assert_eq!(
            check("email", json!("nope")).unwrap_err().to_string(),
            "'nope' is not a valid email address"
        );
    }

    #[test]
    fn test_hex_color() {
        assert!(check("hex_color", json!("#fff")).is_ok());
        assert!(check("hex_color", json!("#A0B1C2")).is_ok());
        assert!(check("hex_color", json!("fff")).is_err());
        assert!(check("hex_color", json!("#ggg")).is_err());
        assert!(check("hex_color", json!("#abcd")).is_err());
        assert!(check("hex_color", json!("#fff\n")).is_err());
    }

    #[test]
    fn test_dates_and_identifiers() {
        assert!(check("uuid", json!("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_ok());
        assert!(check("uuid", json!("not-a-uuid")).is_err());
        assert!(check("date", json!("2024-02-29")).is_ok());
        assert!(check("date", json!("2023-02-29")).is_err());
        assert!(check("date_time", json!("2024-05-01T12:30:00Z")).is_ok());
        assert!(check("date_time", json!("2024-05-01 12:30")).is_err());
        assert!(check("uri", json!("https://example.com/a?b=c")).is_ok());
        assert!(check("uri", json!("not a uri")).is_err());
    }

    #[test]
    fn test_null_passes_and_non_strings_fail() {
        assert!(check("non_blank", Value::Null).is_ok());
        assert!(check("non_blank", json!("   ")).is_err());
        assert_eq!(
            check("email", json!(5)).unwrap_err().to_string(),
            "expected a string, found number"
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FormatRegistry::<Value>::with_builtins();
        registry.register("email", |_: &Value, _: &FieldValue| -> Result<(), FormatError> { Ok(()) });
        assert!(registry
            .get("email")
            .unwrap()
            .validate(&Value::Null, &FieldValue::from(json!("nope")))
            .is_ok());
        assert_eq!(registry.names().count(), 7);
    }
}

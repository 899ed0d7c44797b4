//! Format capabilities and the built-in formats
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::error::{FormatError, PatternError};
use crate::value::FieldValue;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// Semantic check run after the type check.
///
/// A failure is reported as `Err` carrying a message; it is recorded as an
/// `InvalidFormat` error and never aborts validation.
pub trait Format<R: ?Sized>: Send + Sync {
    fn validate(&self, record: &R, value: &FieldValue) -> Result<(), FormatError>;
}

impl<R: ?Sized, F> Format<R> for F
where
    F: Fn(&R, &FieldValue) -> Result<(), FormatError> + Send + Sync,
{
    fn validate(&self, record: &R, value: &FieldValue) -> Result<(), FormatError> {
        self(record, value)
    }
}

/// Shared handle to a format, as stored in field schemas and registries
pub type SharedFormat<R> = Arc<dyn Format<R>>;

/// Extract a string, letting absent and null values through.
///
/// `Ok(None)` means there is nothing to check.
pub fn string_operand<'v>(value: &'v FieldValue) -> Result<Option<&'v str>, FormatError> {
    if value.is_null_like() {
        return Ok(None);
    }
    value
        .as_str()
        .map(Some)
        .ok_or_else(|| FormatError::invalid(format!("expected a string, found {}", value.kind())))
}

/// Regular expression match on string values
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| PatternError {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl<R: ?Sized> Format<R> for Pattern {
    fn validate(&self, _record: &R, value: &FieldValue) -> Result<(), FormatError> {
        match string_operand(value)? {
            Some(s) if !self.regex.is_match(s) => Err(FormatError::invalid(format!(
                "'{}' does not match pattern {}",
                s,
                self.regex.as_str()
            ))),
            _ => Ok(()),
        }
    }
}

/// Value must equal one of an enumerated set
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf {
    allowed: Vec<Value>,
}

impl OneOf {
    pub fn new(allowed: impl IntoIterator<Item = Value>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }
}

impl<R: ?Sized> Format<R> for OneOf {
    fn validate(&self, _record: &R, value: &FieldValue) -> Result<(), FormatError> {
        if value.is_null_like() {
            return Ok(());
        }
        let actual = value.to_json();
        if self.allowed.contains(&actual) {
            Ok(())
        } else {
            let allowed: Vec<String> = self.allowed.iter().map(Value::to_string).collect();
            Err(FormatError::invalid(format!(
                "{} is not one of: {}",
                actual,
                allowed.join(", ")
            )))
        }
    }
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl<R: ?Sized> Format<R> for NumberRange {
    fn validate(&self, _record: &R, value: &FieldValue) -> Result<(), FormatError> {
        if value.is_null_like() {
            return Ok(());
        }
        let n = value
            .as_f64()
            .ok_or_else(|| FormatError::invalid(format!("expected a number, found {}", value.kind())))?;
        if let Some(min) = self.min {
            if n < min {
                return Err(FormatError::invalid(format!("{} must be at least {}", n, min)));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(FormatError::invalid(format!("{} must be at most {}", n, max)));
            }
        }
        Ok(())
    }
}

/// Inclusive length bounds: characters of a string, items of a list, keys of
/// a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthRange {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl LengthRange {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }
}

impl<R: ?Sized> Format<R> for LengthRange {
    fn validate(&self, _record: &R, value: &FieldValue) -> Result<(), FormatError> {
        let len = match value {
            FieldValue::Scalar(Value::String(s)) => s.chars().count(),
            FieldValue::List(items) => items.len(),
            FieldValue::Mapping(map) => map.len(),
            v if v.is_null_like() => return Ok(()),
            v => return Err(FormatError::invalid(format!("{} has no length", v.kind()))),
        };
        if let Some(min) = self.min {
            if len < min {
                return Err(FormatError::invalid(format!("length {} is shorter than {}", len, min)));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(FormatError::invalid(format!("length {} is longer than {}", len, max)));
            }
        }
        Ok(())
    }
}

/// Runs formats in order; the first failure wins
pub struct AllOf<R> {
    formats: Vec<SharedFormat<R>>,
}

impl<R> AllOf<R> {
    pub fn new(formats: Vec<SharedFormat<R>>) -> Self {
        Self { formats }
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl<R> Format<R> for AllOf<R> {
    fn validate(&self, record: &R, value: &FieldValue) -> Result<(), FormatError> {
        self.formats.iter().try_for_each(|format| format.validate(record, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(value: Value) -> FieldValue {
        FieldValue::from(value)
    }

    #[test]
    fn test_pattern() {
        let pattern = Pattern::new("^#[0-9a-f]{6}$").unwrap();
        assert!(Format::<()>::validate(&pattern, &(), &v(json!("#a0b1c2"))).is_ok());
        assert!(Format::<()>::validate(&pattern, &(), &FieldValue::Absent).is_ok());

        let err = Format::<()>::validate(&pattern, &(), &v(json!("red"))).unwrap_err();
        assert_eq!(err.to_string(), "'red' does not match pattern ^#[0-9a-f]{6}$");

        let err = Format::<()>::validate(&pattern, &(), &v(json!(7))).unwrap_err();
        assert_eq!(err.to_string(), "expected a string, found number");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert_eq!(err.pattern, "(unclosed");
    }

    #[test]
    fn test_one_of() {
        let one_of = OneOf::new([json!("daily"), json!("weekly")]);
        assert!(Format::<()>::validate(&one_of, &(), &v(json!("daily"))).is_ok());
        let err = Format::<()>::validate(&one_of, &(), &v(json!("hourly"))).unwrap_err();
        assert_eq!(err.to_string(), r#""hourly" is not one of: "daily", "weekly""#);
    }

    #[test]
    fn test_ranges() {
        let range = NumberRange::new(Some(0.0), Some(10.0));
        assert!(Format::<()>::validate(&range, &(), &v(json!(10))).is_ok());
        assert!(Format::<()>::validate(&range, &(), &v(json!(-1))).is_err());
        assert!(Format::<()>::validate(&range, &(), &v(json!(10.5))).is_err());

        let length = LengthRange::new(Some(1), Some(3));
        assert!(Format::<()>::validate(&length, &(), &v(json!("abc"))).is_ok());
        assert!(Format::<()>::validate(&length, &(), &v(json!([]))).is_err());
        assert!(Format::<()>::validate(&length, &(), &v(json!({"a": 1, "b": 2, "c": 3, "d": 4}))).is_err());
        assert!(Format::<()>::validate(&length, &(), &v(json!(true))).is_err());
    }

    #[test]
    fn test_all_of_stops_at_first_failure() {
        let formats: Vec<SharedFormat<()>> = vec![
            Arc::new(LengthRange::new(Some(2), None)),
            Arc::new(Pattern::new("^[a-z]+$").unwrap()),
        ];
        let all = AllOf::new(formats);
        assert!(all.validate(&(), &v(json!("ok"))).is_ok());
        let err = all.validate(&(), &v(json!("A"))).unwrap_err();
        assert_eq!(err.to_string(), "length 1 is shorter than 2");
    }

    #[test]
    fn test_closure_format() {
        let even = |_: &(), value: &FieldValue| match value.as_f64() {
            Some(n) if n % 2.0 == 0.0 => Ok(()),
            _ => Err(FormatError::invalid("must be even")),
        };
        assert!(even.validate(&(), &v(json!(4))).is_ok());
        assert!(even.validate(&(), &v(json!(3))).is_err());
    }
}

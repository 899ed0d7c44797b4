//! Serializable results of CLI commands

use nestguard_core::{FieldSchema, Schema, ValidationErrors};
use nestguard_schemas::SchemaSet;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of validating one record file
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub record: PathBuf,
    pub valid: bool,
    pub errors: ValidationErrors,
}

impl RecordReport {
    pub fn new(record: PathBuf, errors: ValidationErrors) -> Self {
        Self {
            record,
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Outcome of a validate command
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub schema: PathBuf,
    pub records: Vec<RecordReport>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| !r.valid).count()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().map(|r| r.errors.len()).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.records.iter().all(|r| r.valid)
    }
}

/// One field of a loaded schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub types: Vec<String>,
    pub has_format: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSummary {
    pub attribute: String,
    pub fields: Vec<FieldSummary>,
}

/// Field tree of a loaded schema document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSummary {
    pub schema: PathBuf,
    pub attributes: Vec<AttributeSummary>,
}

impl SchemaSummary {
    pub fn from_set<R>(schema: PathBuf, set: &SchemaSet<R>) -> Self {
        let attributes = set
            .iter()
            .map(|(attribute, schema)| AttributeSummary {
                attribute: attribute.to_string(),
                fields: summarize(schema),
            })
            .collect();
        Self { schema, attributes }
    }
}

fn summarize<R>(schema: &Schema<R>) -> Vec<FieldSummary> {
    schema.iter().map(|(name, field)| summarize_field(name, field)).collect()
}

fn summarize_field<R>(name: &str, field: &FieldSchema<R>) -> FieldSummary {
    FieldSummary {
        name: name.to_string(),
        types: field.type_names(),
        has_format: field.format().is_some(),
        fields: field.children().map(summarize).unwrap_or_default(),
    }
}

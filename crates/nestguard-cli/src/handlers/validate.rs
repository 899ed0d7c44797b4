//! Validation command handler

use super::ensure_exists;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::report::{RecordReport, ValidationReport};
use nestguard_core::ValidationErrors;
use nestguard_schemas::{SchemaLoader, SchemaParser, SchemaSet};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), records = args.records.len()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("validate_command", &format!("schema: {}", args.schema.display()));
    output.info(&format!(
        "Validating {} record(s) against {}",
        args.records.len(),
        args.schema.display()
    ))?;

    let report = run_validation(&args, config)?;
    info!(
        records = report.total(),
        failed = report.failed(),
        duration_ms = timer.elapsed().as_millis() as u64,
        "Validation finished"
    );

    output.validation_report(&report)?;

    if report.is_valid() {
        output.success(&format!("✓ All {} record(s) are valid", report.total()))?;
        Ok(())
    } else {
        warn!(errors = report.error_count(), "Records failed validation");
        output.warning(&format!(
            "{} of {} record(s) failed validation",
            report.failed(),
            report.total()
        ))?;
        Err(Error::ValidationFailed {
            errors: report.error_count(),
            failed: report.failed(),
            total: report.total(),
        })
    }
}

/// Load the schema once and validate every record file against it
pub(crate) fn run_validation(args: &ValidateArgs, config: &Config) -> Result<ValidationReport> {
    ensure_exists(&args.schema)?;

    let validator_config = config
        .validation
        .validator_config(args.max_depth, args.path_style.map(Into::into));
    let schemas = {
        let _timer = Timer::new("schema_loading");
        SchemaLoader::<Value>::new()
            .load_file(&args.schema)?
            .with_config(validator_config)
    };

    if let Some(attribute) = args.attributes.iter().find(|a| schemas.get(a).is_none()) {
        return Err(Error::UnknownAttribute {
            attribute: attribute.clone(),
            schema: args.schema.clone(),
        });
    }

    let records = args
        .records
        .iter()
        .map(|path| {
            let record = read_record(path)?;
            let errors = validate_record(&schemas, &record, &args.attributes);
            debug!(record = %path.display(), errors = errors.len(), "Validated record");
            Ok(RecordReport::new(path.clone(), errors))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ValidationReport {
        schema: args.schema.clone(),
        records,
    })
}

/// Validate the selected attributes, or all of them when none are selected
fn validate_record(schemas: &SchemaSet<Value>, record: &Value, attributes: &[String]) -> ValidationErrors {
    if attributes.is_empty() {
        return schemas.validate(record);
    }

    let mut errors = ValidationErrors::new();
    for attribute in attributes {
        if let Some(found) = schemas.validate_attribute(record, attribute) {
            errors.extend(found);
        }
    }
    errors
}

/// Read a record file; the top level must be an object
fn read_record(path: &Path) -> Result<Value> {
    ensure_exists(path)?;

    let value = SchemaParser::new()
        .parse_file(path)
        .map_err(|e| Error::InvalidRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::InvalidRecord {
            path: path.to_path_buf(),
            reason: "the top level must be an object".to_string(),
        })
    }
}

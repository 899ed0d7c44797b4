//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) for validation reports
//! and schema summaries.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::report::{FieldSummary, SchemaSummary, ValidationReport};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Trait for formatting output with specialized support for command results
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the per-record results of a validate run
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format the field tree of a schema document
    fn format_schema_summary(&self, summary: &SchemaSummary) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // For human format, use pretty JSON as fallback
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => format_validation_report_human(report),
            _ => self.format(report),
        }
    }

    fn format_schema_summary(&self, summary: &SchemaSummary) -> Result<String> {
        match self {
            OutputFormat::Human => format_schema_summary_human(summary),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write a validation report.
    ///
    /// In human format, valid records are omitted in quiet mode and the
    /// line of each record is colored by outcome.
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format != OutputFormat::Human {
            let formatted = self.format.format_validation_report(report)?;
            return self.writeln(formatted.trim_end());
        }

        let formatted = if self.quiet {
            let failures = ValidationReport {
                schema: report.schema.clone(),
                records: report.records.iter().filter(|r| !r.valid).cloned().collect(),
            };
            self.format.format_validation_report(&failures)?
        } else {
            self.format.format_validation_report(report)?
        };

        for line in formatted.lines() {
            let line = match (self.use_color, line.chars().next()) {
                (true, Some('✓')) => line.green().to_string(),
                (true, Some('✗')) => line.red().to_string(),
                _ => line.to_string(),
            };
            self.writeln(&line)?;
        }
        Ok(())
    }

    /// Write a schema summary
    pub fn schema_summary(&mut self, summary: &SchemaSummary) -> Result<()> {
        let formatted = self.format.format_schema_summary(summary)?;
        self.writeln(formatted.trim_end())
    }
}

/// Format a validation report for human reading
fn format_validation_report_human(report: &ValidationReport) -> Result<String> {
    let mut output = String::new();

    for record in &report.records {
        if record.valid {
            output.push_str(&format!("✓ {}\n", record.record.display()));
        } else {
            output.push_str(&format!(
                "✗ {} ({} error(s))\n",
                record.record.display(),
                record.errors.len()
            ));
            for error in &record.errors {
                output.push_str(&format!("    {}\n", error.message));
            }
        }
    }

    Ok(output)
}

/// Format a schema summary for human reading
fn format_schema_summary_human(summary: &SchemaSummary) -> Result<String> {
    let mut output = String::new();

    for attribute in &summary.attributes {
        output.push_str(&attribute.attribute);
        output.push('\n');
        push_fields(&mut output, &attribute.fields, 1);
    }

    Ok(output)
}

fn push_fields(output: &mut String, fields: &[FieldSummary], level: usize) {
    for field in fields {
        let format_marker = if field.has_format { " (format)" } else { "" };
        output.push_str(&format!(
            "{}{}: {}{}\n",
            "  ".repeat(level),
            field.name,
            field.types.join(" | "),
            format_marker
        ));
        push_fields(output, &field.fields, level + 1);
    }
}

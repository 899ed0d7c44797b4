//! Schema inspection command handler

use super::ensure_exists;
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::report::SchemaSummary;
use nestguard_schemas::SchemaLoader;
use serde_json::Value;
use tracing::{info, instrument};

/// Handle the schema command
#[instrument(skip(output), fields(schema = %args.schema.display()))]
pub fn handle_schema(args: SchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("schema_command", &format!("schema: {}", args.schema.display()));
    ensure_exists(&args.schema)?;

    let set = SchemaLoader::<Value>::new().load_file(&args.schema)?;
    info!(attributes = set.len(), "Loaded schema document");

    output.section(&format!("Schema {}", args.schema.display()))?;
    if set.is_empty() {
        output.warning("Schema defines no attributes")?;
    }

    output.schema_summary(&SchemaSummary::from_set(args.schema, &set))
}

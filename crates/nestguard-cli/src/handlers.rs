//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod schema;
mod validate;

pub use completions::handle_completions;
pub use schema::handle_schema;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use std::path::Path;

/// Fail with `FileNotFound` before handing a path to a loader
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        tracing::error!("File not found: {}", path.display());
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

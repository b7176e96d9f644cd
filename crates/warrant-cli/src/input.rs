//! Loading project input files.

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use warrant_pipeline::ProjectInput;

/// Load a project input, choosing the parser by file extension.
pub fn load_input(path: &Path) -> Result<ProjectInput> {
    let contents = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    debug!("loading input from {}", path.display());
    let input = match extension.as_deref() {
        Some("toml") => ProjectInput::from_toml(&contents)?,
        Some("json") => ProjectInput::from_json(&contents)?,
        _ => {
            return Err(CliError::InvalidInput(format!(
                "{}: expected a .toml or .json file",
                path.display()
            )))
        }
    };
    Ok(input)
}

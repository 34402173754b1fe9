//! Loading step lists from JSON or TOML files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{resolve_steps, RawStep, Step};

/// Errors raised while reading a step file.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    #[error("Failed to read step file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON step file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML step file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported step file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Table form: `steps = [...]` (TOML) or `{"steps": [...]}` (JSON).
#[derive(Debug, Deserialize)]
struct StepTable {
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSteps {
    List(Vec<RawStep>),
    Table(StepTable),
}

/// Parse step-file contents in the format implied by `extension`.
pub fn parse_steps(
    content: &str,
    extension: &str,
    default_delay_ms: u64,
) -> Result<Option<Vec<Step>>, SequenceError> {
    let raw = match extension {
        "json" => match serde_json::from_str::<JsonSteps>(content)? {
            JsonSteps::List(steps) => steps,
            JsonSteps::Table(table) => table.steps,
        },
        "toml" => toml::from_str::<StepTable>(content)?.steps,
        _ => return Ok(None),
    };
    Ok(Some(resolve_steps(&raw, default_delay_ms)))
}

/// Load a step list from `path`. The extension selects the format.
pub fn load_steps(path: &Path, default_delay_ms: u64) -> Result<Vec<Step>, SequenceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if extension != "json" && extension != "toml" {
        return Err(SequenceError::UnsupportedFormat(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| SequenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_steps(&content, &extension, default_delay_ms)?
        .ok_or_else(|| SequenceError::UnsupportedFormat(path.to_path_buf()))
}

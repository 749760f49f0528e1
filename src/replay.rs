//! Action-script replay.
//!
//! Seeds a [`TemplatingState`] from a persisted variable list and applies a
//! JSON-lines script of [`VariableIntent`]s, one per line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::variables::{TemplatingState, VariableIntent, VariableModel, VariablesReducer};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}' line {line}: {source}")]
    Parse {
        path: PathBuf,
        /// 1-based; 0 for whole-document formats.
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a replay run.
#[derive(Debug)]
pub struct ReplayReport {
    pub state: TemplatingState,
    pub applied: usize,
    pub rejected: usize,
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of persisted variables.
pub fn load_variables(path: &Path) -> Result<Vec<VariableModel>, ReplayError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| ReplayError::Parse {
        path: path.to_path_buf(),
        line: 0,
        source,
    })
}

/// Parse a JSON-lines script. Blank lines and `#` comments are skipped.
pub fn parse_script(content: &str, path: &Path) -> Result<Vec<VariableIntent>, ReplayError> {
    content
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                source,
            })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<VariableIntent>, ReplayError> {
    let content = read(path)?;
    parse_script(&content, path)
}

/// Apply `intents` in order. Rejected intents are logged and skipped.
pub fn replay(
    reducer: &VariablesReducer<'_>,
    state: TemplatingState,
    intents: Vec<VariableIntent>,
) -> ReplayReport {
    let mut report = ReplayReport {
        state,
        applied: 0,
        rejected: 0,
    };

    for (step, intent) in intents.into_iter().enumerate() {
        let action = intent.name();
        match reducer.try_reduce(&report.state, intent) {
            Ok(next) => {
                report.state = next;
                report.applied += 1;
                if !report.state.has_contiguous_indices() {
                    tracing::warn!(step, action, "Variable indices are no longer contiguous");
                }
            }
            Err(err) => {
                report.rejected += 1;
                tracing::warn!(step, action, error = %err, "Skipping rejected intent");
            }
        }
    }

    tracing::info!(
        applied = report.applied,
        rejected = report.rejected,
        variables = report.state.len(),
        "Replay finished"
    );
    report
}

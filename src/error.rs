use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of the collection pipeline.
///
/// Both variants abort the run before any record reaches the dashboard.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error(
        "column '{column}' not found in the source (columns found: {found:?}); check the source file"
    )]
    SchemaMissing { column: String, found: Vec<String> },
}

impl PipelineError {
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        PipelineError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// A numeric cell that could not be parsed. Non-terminal: the field is
/// treated as missing and processing continues.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoercionWarning {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub column: String,
    pub text: String,
}

impl fmt::Display for FieldCoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column '{}': '{}' is not a number",
            self.row, self.column, self.text
        )
    }
}

//! Error types for the tabular cleaner.
//!
//! Every operation fails with one of four error kinds. The kinds are a closed
//! set so callers can branch on [`CleanerError::error_code`] instead of
//! parsing message text.
//!
//! Errors serialize as `{"error": <message>, "code": <code>}`, which is the
//! payload the JSON tool boundary hands back to the agent layer.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The error type for profiling and cleaning operations.
#[derive(Error, Debug)]
pub enum CleanerError {
    /// Input path does not exist or cannot be opened.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Content could not be parsed as delimited tabular data.
    #[error("Failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A column used in a numeric computation holds non-numeric values.
    #[error("Column '{column}' is not numeric: {reason}")]
    TypeCoercion { column: String, reason: String },

    /// Creating the output directory or writing the output file failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanerError {
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn type_coercion(column: impl Into<String>, reason: impl ToString) -> Self {
        Self::TypeCoercion {
            column: column.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable error code for callers that branch on the error category.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::TypeCoercion { .. } => "TYPE_COERCION_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl Serialize for CleanerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleanerError", 2)?;
        state.serialize_field("error", &self.to_string())?;
        state.serialize_field("code", &self.error_code())?;
        state.end()
    }
}

/// Result type alias for cleaner operations.
pub type Result<T> = std::result::Result<T, CleanerError>;

//! Error types for the document pipeline.
//!
//! Every variant here is fatal: the run is aborted and no documents are
//! produced. Referential gaps and zero-mean groups are not errors and
//! never surface through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline error.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An input table file does not exist.
    #[error("Missing input file: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Error opening or reading a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line that is not a well-formed JSON object.
    #[error("Malformed JSON in '{}' at line {line}: {message}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A row without one of the fields its table requires.
    #[error("Missing field '{field}' in '{}' at line {line}", path.display())]
    MissingField {
        path: PathBuf,
        line: usize,
        field: &'static str,
    },

    /// A Food/Compound `id` that is not an integer.
    #[error("Invalid identifier {value} in '{}' at line {line}", path.display())]
    InvalidId {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// A content value that cannot be read as a number.
    #[error("Non-numeric content {value} for food {food_id}, compound {compound_id}")]
    NonNumericContent {
        food_id: i64,
        compound_id: i64,
        value: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LoadError {
    /// Wrap a `std::io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        LoadError::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, LoadError>;

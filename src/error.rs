// Error taxonomy for the FARS pipeline
// One enum for every fatal condition; isolation happens in `years`, not here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving, loading, summarising or mapping FARS data.
#[derive(Debug, Error)]
pub enum FarsError {
    /// The requested data file does not exist.
    #[error("file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed tabular content.
    #[error("failed to parse line {line} in '{}': {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The header row lacks columns the pipeline depends on.
    #[error("'{}' is missing required columns: {}", path.display(), columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// A year value that cannot be coerced to a whole number.
    #[error("invalid year: {value}")]
    InvalidYear { value: String },

    /// A state code that cannot be coerced to a whole number.
    #[error("invalid state code: {value}")]
    InvalidStateCode { value: String },

    /// A state code absent from the loaded year's STATE column.
    #[error("invalid STATE number: {state}")]
    InvalidStateNumber { state: i64 },

    /// The drawing surface rejected an operation.
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FarsError>;

//! Error types for the chromapipe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error reading or accessing a file or directory.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be mapped onto the header.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A requested column does not exist in the table.
    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    /// A column was required to be numeric but holds text.
    #[error("Column '{0}' is not numeric")]
    NonNumericColumn(String),

    /// A column's length does not match the column it is paired with.
    #[error("Length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A column contains NaN or infinite values where finite ones are required.
    #[error("Column '{column}' contains missing or non-finite values")]
    NonFiniteValue { column: String },

    /// A column with the same name already exists in the table.
    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),

    /// The plot window could not be created or run.
    #[error("Plot error: {0}")]
    Plot(String),

    /// Plotting was requested but the crate was built without the `plot` feature.
    #[error("Plotting is not available (built without the `plot` feature)")]
    PlotUnavailable,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

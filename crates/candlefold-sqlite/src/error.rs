//! Error types for the SQLite resampling layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for candlefold-sqlite operations.
pub type Result<T> = std::result::Result<T, ResampleError>;

/// Errors that can occur while opening a database or resampling.
#[derive(Error, Debug)]
pub enum ResampleError {
    /// The database file could not be opened.
    #[error("cannot open database {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying engine error.
        source: rusqlite::Error,
    },

    /// The engine reported an error preparing or running a statement.
    #[error("SQL error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An aggregate produced NULL where a value was required.
    #[error("aggregate column '{column}' is NULL")]
    NullAggregate {
        /// Result column that was unexpectedly NULL.
        column: &'static str,
    },

    /// An aggregate produced text that does not parse as a number.
    #[error("aggregate column '{column}' is not numeric: '{value}'")]
    NonNumeric {
        /// Result column holding the bad value.
        column: &'static str,
        /// The offending text.
        value: String,
    },
}

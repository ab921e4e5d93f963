//! Error types for the rating-store crate.

use thiserror::Error;

/// Errors that can occur while loading, parsing, or appending rating data.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The base dataset could not be read. Fatal at startup.
    #[error("base dataset unavailable: {path}")]
    DataUnavailable { path: String },

    /// I/O error while reading or writing a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// A submitted rating was outside the allowed scale
    #[error("invalid rating {value}: must be within [0.5, 5.0]")]
    InvalidRating { value: f32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;

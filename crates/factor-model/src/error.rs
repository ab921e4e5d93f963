//! Error types for model training.

use thiserror::Error;

/// Errors that can occur while fitting a model
#[derive(Error, Debug)]
pub enum TrainError {
    /// The training input contained no ratings. Fatal to this training
    /// attempt only; any previously trained snapshot stays usable.
    #[error("cannot train on an empty rating dataset")]
    EmptyDataset,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, TrainError>;

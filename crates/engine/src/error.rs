//! Engine error taxonomy and the boundary error payload.
//!
//! Input-validation errors never crash the serving process: the boundary
//! converts them to [`ErrorPayload`] responses. A failed training attempt
//! leaves the previously active snapshot untouched, so the service degrades
//! to a stale model rather than no model.

use factor_model::TrainError;
use ranker::RankError;
use rating_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Everything the four service operations can fail with
#[derive(Error, Debug)]
pub enum EngineError {
    /// Store-level failure: missing base data (fatal at startup) or a
    /// rejected rating (recoverable)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Training failure; fatal to the retrain attempt, not the service
    #[error(transparent)]
    Training(#[from] TrainError),

    /// Ranking failure (unknown user); recoverable
    #[error(transparent)]
    Ranking(#[from] RankError),

    /// A retrain was requested while one is already running. The caller may
    /// retry once the in-flight retrain finishes.
    #[error("A retrain is already in progress.")]
    RetrainInProgress,

    /// A background worker task died before producing a result
    #[error("internal task failure")]
    TaskPanicked,
}

/// Structured error response returned at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&EngineError> for ErrorPayload {
    fn from(err: &EngineError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;

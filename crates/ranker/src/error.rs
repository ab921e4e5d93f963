//! Error types for ranking.

use rating_store::UserId;
use thiserror::Error;

/// Errors that can occur while ranking candidates
#[derive(Error, Debug)]
pub enum RankError {
    /// The user never appears in the snapshot's training dataset, so there
    /// is no seen set to rank against. Recoverable: the caller turns this
    /// into an error payload, nothing crashes and nothing is mutated.
    #[error("User ID {user_id} not found.")]
    UnknownUser { user_id: UserId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RankError>;

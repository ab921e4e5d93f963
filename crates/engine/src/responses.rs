//! Success payloads for the service boundary.
//!
//! Shapes mirror what the routing layer serializes to callers; the ranked
//! and popular list payloads live with their producers in the ranker crate.

use rating_store::{MovieId, UserId};
use serde::Serialize;

/// Acknowledgment for an accepted rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAck {
    pub message: String,
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
}

/// Acknowledgment for a completed retrain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrainReport {
    pub message: String,
}

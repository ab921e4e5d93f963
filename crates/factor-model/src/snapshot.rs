//! The trained model snapshot.
//!
//! A snapshot is immutable after construction: the retrain path builds a
//! whole new one and swaps a single reference, so readers always observe a
//! fully-old or fully-new model, never a partially updated one.

use ndarray::Array2;
use rating_store::{MovieId, RATING_MAX, RATING_MIN, UserId};
use std::collections::{HashMap, HashSet};

/// Trained model state plus what consumers need to know about the dataset
/// it was trained on: which (user, movie) pairs are seen, and the distinct
/// item ids in first-appearance order (the candidate enumeration order).
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub(crate) global_mean: f32,
    pub(crate) user_index: HashMap<UserId, usize>,
    pub(crate) item_index: HashMap<MovieId, usize>,
    /// Distinct movie ids of the training dataset, first appearance first
    pub(crate) items: Vec<MovieId>,
    pub(crate) user_bias: Vec<f32>,
    pub(crate) item_bias: Vec<f32>,
    /// num_users x num_factors
    pub(crate) user_factors: Array2<f32>,
    /// num_items x num_factors
    pub(crate) item_factors: Array2<f32>,
    /// Per-user set of rated movie ids
    pub(crate) seen: HashMap<UserId, HashSet<MovieId>>,
    pub(crate) num_ratings: usize,
}

impl ModelSnapshot {
    /// Predict the rating `user_id` would give `movie_id`, clamped to the
    /// rating scale.
    ///
    /// Cold-start policy: a user or movie absent from the training dataset
    /// contributes nothing, so the estimate degrades toward the global mean
    /// instead of failing.
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        let user = self.user_index.get(&user_id).copied();
        let item = self.item_index.get(&movie_id).copied();

        let mut est = self.global_mean;
        if let Some(u) = user {
            est += self.user_bias[u];
        }
        if let Some(i) = item {
            est += self.item_bias[i];
        }
        if let (Some(u), Some(i)) = (user, item) {
            est += self.user_factors.row(u).dot(&self.item_factors.row(i));
        }

        est.clamp(RATING_MIN, RATING_MAX)
    }

    /// Whether the user appears in the training dataset
    pub fn knows_user(&self, user_id: UserId) -> bool {
        self.user_index.contains_key(&user_id)
    }

    /// Movie ids the user rated in the training dataset
    pub fn seen_by(&self, user_id: UserId) -> Option<&HashSet<MovieId>> {
        self.seen.get(&user_id)
    }

    /// Distinct movie ids of the training dataset, in first-appearance
    /// order. This order is what makes tie-broken rankings deterministic.
    pub fn items(&self) -> &[MovieId] {
        &self.items
    }

    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }

    pub fn num_users(&self) -> usize {
        self.user_index.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Number of ratings the snapshot was trained on
    pub fn num_ratings(&self) -> usize {
        self.num_ratings
    }
}

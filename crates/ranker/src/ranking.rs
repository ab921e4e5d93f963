//! Model-based top-N ranking.
//!
//! ## Algorithm
//! 1. Look up the user's seen set in the snapshot (unknown user is an error)
//! 2. Candidates are every distinct movie of the training dataset the user
//!    has not rated, in the snapshot's enumeration order
//! 3. Predict a rating for each candidate (in parallel, order preserved)
//! 4. Stable-sort by prediction descending — float ties keep candidate
//!    enumeration order, so results are deterministic
//! 5. Truncate to `n` and resolve titles

use crate::error::{RankError, Result};
use factor_model::ModelSnapshot;
use rating_store::{MovieCatalog, MovieId, UserId};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// One ranked recommendation, shaped for the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMovie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub predicted_rating: f32,
}

/// Round to two decimals for presentation; done after ranking so display
/// precision never reorders results.
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Rank the top `n` unseen movies for a user.
///
/// `n = 0` returns an empty list; fewer than `n` candidates returns all of
/// them. Movie ids missing from the catalog keep their slot with an
/// "Unknown" title.
#[instrument(skip(snapshot, catalog))]
pub fn top_n(
    snapshot: &ModelSnapshot,
    catalog: &MovieCatalog,
    user_id: UserId,
    n: usize,
) -> Result<Vec<RankedMovie>> {
    let seen = snapshot
        .seen_by(user_id)
        .ok_or(RankError::UnknownUser { user_id })?;

    let candidates: Vec<MovieId> = snapshot
        .items()
        .iter()
        .copied()
        .filter(|movie_id| !seen.contains(movie_id))
        .collect();

    let mut scored: Vec<(MovieId, f32)> = candidates
        .par_iter()
        .map(|&movie_id| (movie_id, snapshot.predict(user_id, movie_id)))
        .collect();

    // Stable sort: equal predictions keep their enumeration order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(n);

    debug!(
        user_id,
        candidates = candidates.len(),
        returned = scored.len(),
        "ranked top-n"
    );

    Ok(scored
        .into_iter()
        .map(|(movie_id, score)| RankedMovie {
            movie_id,
            title: catalog.title_or_unknown(movie_id).to_string(),
            predicted_rating: round2(score),
        })
        .collect())
}

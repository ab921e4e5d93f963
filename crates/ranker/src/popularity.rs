//! Popularity ranking: a pure statistical aggregate over the rating
//! dataset. Never touches the trained model, so it works before any
//! training has run and its ordering is unaffected by retrains.

use rating_store::{MovieCatalog, MovieId, Rating};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// One popularity-ranked movie, shaped for the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularMovie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
}

/// Rank the top `n` movies by (rating count, mean rating).
///
/// Sort order: count descending, then mean descending, then movie id
/// ascending so full ties are deterministic.
pub fn popular(ratings: &[Rating], catalog: &MovieCatalog, n: usize) -> Vec<PopularMovie> {
    let mut stats: HashMap<MovieId, (u32, f64)> = HashMap::new();
    for r in ratings {
        let entry = stats.entry(r.movie_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.rating as f64;
    }

    let mut ranked: Vec<(MovieId, u32, f64)> = stats
        .into_iter()
        .map(|(movie_id, (count, sum))| (movie_id, count, sum / count as f64))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(n);

    debug!(returned = ranked.len(), "ranked popular movies");

    ranked
        .into_iter()
        .map(|(movie_id, _, _)| PopularMovie {
            movie_id,
            title: catalog.title_or_unknown(movie_id).to_string(),
        })
        .collect()
}

//! Core domain types for the rating dataset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Lower bound of the rating scale (inclusive)
pub const RATING_MIN: f32 = 0.5;

/// Upper bound of the rating scale (inclusive)
pub const RATING_MAX: f32 = 5.0;

/// A single rating given by a user to a movie.
///
/// Duplicate (user, movie) pairs are allowed: a later rating does not
/// replace an earlier one, both stay in the dataset as independent
/// observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value on the [RATING_MIN, RATING_MAX] scale
    pub rating: f32,
}

/// Reference data for a movie. Loaded once, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Pipe-separated in the source file; "(no genres listed)" maps to empty
    pub genres: Vec<String>,
}

/// Title shown for movie ids with no entry in the catalog
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Read-only id -> movie lookup built from the reference dataset.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    movies: HashMap<MovieId, Movie>,
}

impl MovieCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Title for the id, falling back to [`UNKNOWN_TITLE`] so a missing
    /// catalog entry never fails a whole request.
    pub fn title_or_unknown(&self, id: MovieId) -> &str {
        self.movies
            .get(&id)
            .map(|m| m.title.as_str())
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Check a rating value against the closed [RATING_MIN, RATING_MAX] scale.
///
/// NaN fails the containment check and is rejected like any other
/// out-of-range value.
pub fn validate_rating(value: f32) -> crate::error::Result<()> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(())
    } else {
        Err(crate::error::StoreError::InvalidRating { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(0.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(3.7).is_ok());

        assert!(validate_rating(0.49).is_err());
        assert!(validate_rating(5.01).is_err());
        assert!(validate_rating(-1.0).is_err());
        assert!(validate_rating(f32::NAN).is_err());
    }

    #[test]
    fn test_catalog_lookup_and_fallback() {
        let catalog = MovieCatalog::new(vec![Movie {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: vec!["Animation".to_string(), "Comedy".to_string()],
        }]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.title_or_unknown(1), "Toy Story (1995)");
        assert_eq!(catalog.title_or_unknown(999), UNKNOWN_TITLE);
        assert!(catalog.get(999).is_none());
    }
}

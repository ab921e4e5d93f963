//! # Rating Store Crate
//!
//! Loading, validation, and storage of the movie rating dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, MovieCatalog)
//! - **parser**: Parse the CSV datasets into Rust structs
//! - **store**: RatingStore — immutable base plus the durable append-only
//!   rating log, merged on demand for training
//! - **error**: Error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use rating_store::{DataPaths, MovieCatalog, RatingStore, parser};
//! use std::path::Path;
//!
//! let paths = DataPaths::from_dir(Path::new("data"));
//! let store = RatingStore::open(&paths.ratings, &paths.rating_log)?;
//! let catalog = MovieCatalog::new(parser::parse_movies(&paths.movies)?);
//!
//! store.append(1, 31, 4.5)?;
//! let training_input = store.merged_view();
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Result, StoreError};
pub use store::{DataPaths, RatingStore};
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Movie,
    MovieCatalog,
    Rating,
    // Scale constants
    RATING_MAX,
    RATING_MIN,
    UNKNOWN_TITLE,
    validate_rating,
};

/// Load the movie catalog and rating store from conventional paths, parsing
/// the two reference files in parallel.
///
/// A missing movie file is not fatal: titles degrade to the
/// [`UNKNOWN_TITLE`] fallback. A missing rating base is
/// [`StoreError::DataUnavailable`].
pub fn load_dataset(paths: &DataPaths) -> Result<(RatingStore, MovieCatalog)> {
    let (movies, store) = rayon::join(
        || parser::parse_movies(&paths.movies),
        || RatingStore::open(&paths.ratings, &paths.rating_log),
    );

    let catalog = match movies {
        Ok(movies) => MovieCatalog::new(movies),
        Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %paths.movies.display(), "movie file not found, titles will be unknown");
            MovieCatalog::default()
        }
        Err(e) => return Err(e),
    };

    Ok((store?, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ratings.csv"),
            "userId,movieId,rating,timestamp\n1,1,4.0,100\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("movies.csv"),
            "movieId,title,genres\n1,Toy Story (1995),Animation\n",
        )
        .unwrap();

        let paths = DataPaths::from_dir(dir.path());
        let (store, catalog) = load_dataset(&paths).unwrap();

        assert_eq!(store.base_len(), 1);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.title_or_unknown(1), "Toy Story (1995)");
    }

    #[test]
    fn test_load_dataset_missing_movies_file_degrades_to_unknown() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ratings.csv"), "1,1,4.0\n").unwrap();

        let paths = DataPaths::from_dir(dir.path());
        let (store, catalog) = load_dataset(&paths).unwrap();
        assert_eq!(store.base_len(), 1);
        assert!(catalog.is_empty());
        assert_eq!(catalog.title_or_unknown(1), UNKNOWN_TITLE);
    }
}

//! # Ranker Crate
//!
//! Candidate scoring and ranking over a trained snapshot.
//!
//! ## Components
//!
//! ### Model-based top-N
//! Score every movie the user has not rated with the snapshot and return
//! the best `n`, sorted by predicted rating with a deterministic tie-break.
//!
//! ### Popularity ranking
//! Model-free (count, mean) aggregate over the rating dataset — available
//! even when training has never run.
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranker::{popular, top_n};
//!
//! let recommendations = top_n(&snapshot, &catalog, user_id, 5)?;
//! let trending = popular(&store.merged_view(), &catalog, 10);
//! ```

// Public modules
pub mod error;
pub mod popularity;
pub mod ranking;

// Re-export commonly used types
pub use error::{RankError, Result};
pub use popularity::{PopularMovie, popular};
pub use ranking::{RankedMovie, top_n};

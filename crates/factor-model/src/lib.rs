//! # Factor Model Crate
//!
//! Latent-factor rating prediction: training and the immutable trained
//! snapshot.
//!
//! ## Main Components
//!
//! - **config**: SvdConfig hyperparameters
//! - **trainer**: SvdTrainer — biased matrix factorization fit by SGD
//! - **snapshot**: ModelSnapshot — immutable trained state with
//!   cold-start-safe prediction
//! - **error**: Error types for training
//!
//! ## Example Usage
//!
//! ```ignore
//! use factor_model::{SvdConfig, SvdTrainer};
//!
//! let trainer = SvdTrainer::new(SvdConfig::default().with_seed(42));
//! let snapshot = trainer.train(&store.merged_view())?;
//!
//! let estimate = snapshot.predict(user_id, movie_id);
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod snapshot;
pub mod trainer;

// Re-export commonly used types
pub use config::SvdConfig;
pub use error::{Result, TrainError};
pub use snapshot::ModelSnapshot;
pub use trainer::SvdTrainer;

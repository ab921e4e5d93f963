//! # Engine Service
//!
//! The mutable heart of the system: one service object owns the rating
//! store, the movie catalog, and the reference to the active model
//! snapshot, and exposes the four operations the routing layer calls:
//! 1. recommend — model-based top-N for a user
//! 2. popular — statistical ranking, model-free
//! 3. rate — validate and durably append a new rating
//! 4. retrain — rebuild the snapshot from the merged dataset
//!
//! ## Concurrency
//!
//! Reads (`recommend`, `popular`) run fully in parallel: they clone the
//! active `Arc<ModelSnapshot>` under a read lock held only for the clone.
//! Training never holds a lock — it runs on a blocking thread against a
//! private snapshot and takes the write lock only to publish the result.
//! An `AtomicBool` gate admits one retrain at a time; a request arriving
//! while one is in flight is rejected, not queued.

use crate::error::{EngineError, Result};
use crate::responses::{RatingAck, RetrainReport};
use factor_model::{ModelSnapshot, SvdConfig, SvdTrainer};
use ranker::{PopularMovie, RankedMovie};
use rating_store::{MovieCatalog, MovieId, RatingStore, UserId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task;
use tracing::{info, instrument, warn};

pub struct EngineService {
    store: Arc<RatingStore>,
    catalog: Arc<MovieCatalog>,
    trainer: SvdTrainer,
    /// Active snapshot reference. Swapped wholesale on retrain; a request
    /// observes either the fully-old or the fully-new snapshot.
    snapshot: RwLock<Arc<ModelSnapshot>>,
    /// One retrain in flight at a time
    retraining: AtomicBool,
}

impl std::fmt::Debug for EngineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineService")
            .field("retraining", &self.retraining)
            .finish_non_exhaustive()
    }
}

impl EngineService {
    /// Build the service and run initial training on the merged dataset.
    ///
    /// Fails if the dataset cannot be trained on (empty base and log); a
    /// missing base file has already failed earlier, at store open.
    pub async fn new(
        store: RatingStore,
        catalog: MovieCatalog,
        config: SvdConfig,
    ) -> Result<Self> {
        let store = Arc::new(store);
        let catalog = Arc::new(catalog);
        let trainer = SvdTrainer::new(config);

        let snapshot = Self::train_in_background(trainer.clone(), store.clone()).await?;
        info!(
            users = snapshot.num_users(),
            items = snapshot.num_items(),
            "engine ready"
        );

        Ok(Self {
            store,
            catalog,
            trainer,
            snapshot: RwLock::new(Arc::new(snapshot)),
            retraining: AtomicBool::new(false),
        })
    }

    /// Top `n` unseen movies for a user, scored against the active
    /// snapshot.
    #[instrument(skip(self))]
    pub async fn recommend(&self, user_id: UserId, n: usize) -> Result<Vec<RankedMovie>> {
        let snapshot = self.snapshot.read().await.clone();
        let catalog = self.catalog.clone();

        task::spawn_blocking(move || ranker::top_n(&snapshot, &catalog, user_id, n))
            .await
            .map_err(|_| EngineError::TaskPanicked)?
            .map_err(Into::into)
    }

    /// Top `n` movies by (count, mean) over the live merged dataset. Never
    /// touches the model.
    #[instrument(skip(self))]
    pub async fn popular(&self, n: usize) -> Result<Vec<PopularMovie>> {
        let store = self.store.clone();
        let catalog = self.catalog.clone();

        task::spawn_blocking(move || {
            let ratings = store.merged_view();
            ranker::popular(&ratings, &catalog, n)
        })
        .await
        .map_err(|_| EngineError::TaskPanicked)
    }

    /// Validate and durably append a new rating. The record is persisted
    /// before the acknowledgment is returned.
    #[instrument(skip(self))]
    pub async fn rate(&self, user_id: UserId, movie_id: MovieId, rating: f32) -> Result<RatingAck> {
        let store = self.store.clone();
        let record = task::spawn_blocking(move || store.append(user_id, movie_id, rating))
            .await
            .map_err(|_| EngineError::TaskPanicked)??;

        Ok(RatingAck {
            message: "Rating submitted successfully!".to_string(),
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: record.rating,
        })
    }

    /// Retrain on the merged dataset and swap the active snapshot.
    ///
    /// Only one retrain may be in flight; a concurrent request gets
    /// [`EngineError::RetrainInProgress`]. On failure the previous snapshot
    /// stays active. Ratings appended while training runs are picked up by
    /// the next retrain.
    #[instrument(skip(self))]
    pub async fn retrain(&self) -> Result<RetrainReport> {
        if self
            .retraining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EngineError::RetrainInProgress);
        }

        let started = Instant::now();
        let outcome = match Self::train_in_background(self.trainer.clone(), self.store.clone())
            .await
        {
            Ok(new_snapshot) => {
                *self.snapshot.write().await = Arc::new(new_snapshot);
                info!(elapsed = ?started.elapsed(), "retrain complete, snapshot swapped");
                Ok(RetrainReport {
                    message: "Model retrained using the rating log.".to_string(),
                })
            }
            Err(err) => {
                warn!(error = %err, "retrain failed, previous snapshot stays active");
                Err(err)
            }
        };

        // Release the gate on success and failure alike
        self.retraining.store(false, Ordering::SeqCst);
        outcome
    }

    /// Train on a blocking thread so the runtime (and every read path)
    /// stays responsive for the duration.
    async fn train_in_background(
        trainer: SvdTrainer,
        store: Arc<RatingStore>,
    ) -> Result<ModelSnapshot> {
        task::spawn_blocking(move || {
            let ratings = store.merged_view();
            trainer.train(&ratings)
        })
        .await
        .map_err(|_| EngineError::TaskPanicked)?
        .map_err(Into::into)
    }

    /// The currently active snapshot.
    pub async fn active_snapshot(&self) -> Arc<ModelSnapshot> {
        self.snapshot.read().await.clone()
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }
}

//! SGD matrix-factorization training.
//!
//! ## Algorithm
//!
//! Biased matrix factorization over the observed ratings: each prediction is
//! `global_mean + user_bias + item_bias + p_u . q_i`, and each epoch walks
//! the training set once, nudging the biases and both latent rows along the
//! gradient of the regularized squared error. Biases start at zero; latent
//! vectors start uniform in [-0.1, 0.1) from a seedable RNG, which is the
//! only stochastic input — a fixed seed makes training fully deterministic.

use crate::config::SvdConfig;
use crate::error::{Result, TrainError};
use crate::snapshot::ModelSnapshot;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rating_store::{MovieId, Rating, UserId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Fits a [`ModelSnapshot`] from a rating slice.
#[derive(Debug, Clone)]
pub struct SvdTrainer {
    config: SvdConfig,
}

impl SvdTrainer {
    pub fn new(config: SvdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SvdConfig {
        &self.config
    }

    /// Train a new snapshot.
    ///
    /// Users and items are indexed by first appearance in `ratings`, which
    /// fixes the candidate enumeration order downstream. Duplicate
    /// (user, movie) pairs are kept as independent observations.
    #[instrument(skip(self, ratings), fields(num_ratings = ratings.len()))]
    pub fn train(&self, ratings: &[Rating]) -> Result<ModelSnapshot> {
        if ratings.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let mut user_index: HashMap<UserId, usize> = HashMap::new();
        let mut item_index: HashMap<MovieId, usize> = HashMap::new();
        let mut items: Vec<MovieId> = Vec::new();
        let mut seen: HashMap<UserId, HashSet<MovieId>> = HashMap::new();

        for r in ratings {
            let next = user_index.len();
            user_index.entry(r.user_id).or_insert(next);
            if !item_index.contains_key(&r.movie_id) {
                item_index.insert(r.movie_id, items.len());
                items.push(r.movie_id);
            }
            seen.entry(r.user_id).or_default().insert(r.movie_id);
        }

        let global_mean =
            (ratings.iter().map(|r| r.rating as f64).sum::<f64>() / ratings.len() as f64) as f32;

        // Resolve ids to dense indices once; the epoch loop is hot
        let samples: Vec<(usize, usize, f32)> = ratings
            .iter()
            .map(|r| (user_index[&r.user_id], item_index[&r.movie_id], r.rating))
            .collect();

        let num_users = user_index.len();
        let num_items = items.len();
        let k = self.config.num_factors;
        let lr = self.config.learning_rate;
        let reg = self.config.regularization;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut user_factors = Array2::<f32>::zeros((num_users, k));
        let mut item_factors = Array2::<f32>::zeros((num_items, k));
        for v in user_factors.iter_mut() {
            *v = rng.random_range(-0.1..0.1);
        }
        for v in item_factors.iter_mut() {
            *v = rng.random_range(-0.1..0.1);
        }

        let mut user_bias = vec![0.0f32; num_users];
        let mut item_bias = vec![0.0f32; num_items];

        for epoch in 0..self.config.epochs {
            let mut sse = 0.0f64;
            for &(u, i, rating) in &samples {
                let dot = user_factors.row(u).dot(&item_factors.row(i));
                let err = rating - (global_mean + user_bias[u] + item_bias[i] + dot);
                sse += (err as f64) * (err as f64);

                user_bias[u] += lr * (err - reg * user_bias[u]);
                item_bias[i] += lr * (err - reg * item_bias[i]);
                for f in 0..k {
                    let puf = user_factors[[u, f]];
                    let qif = item_factors[[i, f]];
                    user_factors[[u, f]] += lr * (err * qif - reg * puf);
                    item_factors[[i, f]] += lr * (err * puf - reg * qif);
                }
            }

            let rmse = (sse / samples.len() as f64).sqrt();
            debug!(epoch, rmse, "epoch complete");
        }

        info!(
            users = num_users,
            items = num_items,
            ratings = samples.len(),
            factors = k,
            "model trained"
        );

        Ok(ModelSnapshot {
            global_mean,
            user_index,
            item_index,
            items,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
            seen,
            num_ratings: ratings.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rating_store::{RATING_MAX, RATING_MIN};

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
        }
    }

    fn polarized_ratings() -> Vec<Rating> {
        vec![
            rating(1, 10, 5.0),
            rating(1, 20, 0.5),
            rating(2, 10, 5.0),
            rating(2, 20, 0.5),
        ]
    }

    fn test_config() -> SvdConfig {
        SvdConfig::default().with_num_factors(8).with_seed(42)
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let trainer = SvdTrainer::new(test_config());
        assert!(matches!(trainer.train(&[]), Err(TrainError::EmptyDataset)));
    }

    #[test]
    fn test_training_is_deterministic_with_fixed_seed() {
        let trainer = SvdTrainer::new(test_config());
        let a = trainer.train(&polarized_ratings()).unwrap();
        let b = trainer.train(&polarized_ratings()).unwrap();

        for &user in &[1, 2] {
            for &movie in &[10, 20] {
                assert_eq!(a.predict(user, movie), b.predict(user, movie));
            }
        }
    }

    #[test]
    fn test_predictions_stay_on_the_rating_scale() {
        let trainer = SvdTrainer::new(test_config().with_epochs(50));
        let snapshot = trainer.train(&polarized_ratings()).unwrap();

        for &user in &[1, 2, 999] {
            for &movie in &[10, 20, 999] {
                let p = snapshot.predict(user, movie);
                assert!((RATING_MIN..=RATING_MAX).contains(&p), "{p} out of scale");
            }
        }
    }

    #[test]
    fn test_liked_item_ranks_above_disliked_item() {
        let trainer = SvdTrainer::new(test_config().with_epochs(50));
        let snapshot = trainer.train(&polarized_ratings()).unwrap();

        assert!(snapshot.predict(1, 10) > snapshot.predict(1, 20));
        assert!(snapshot.predict(2, 10) > snapshot.predict(2, 20));
    }

    #[test]
    fn test_cold_start_falls_back_to_global_mean() {
        let trainer = SvdTrainer::new(test_config());
        let snapshot = trainer.train(&polarized_ratings()).unwrap();

        // (5.0 + 0.5 + 5.0 + 0.5) / 4
        let mean = 2.75;
        assert!((snapshot.global_mean() - mean).abs() < 1e-6);
        // Neither user nor movie in the training set: exactly the mean
        assert_eq!(snapshot.predict(999, 999), snapshot.global_mean());
    }

    #[test]
    fn test_snapshot_records_dataset_shape() {
        let trainer = SvdTrainer::new(test_config());
        let snapshot = trainer.train(&polarized_ratings()).unwrap();

        assert_eq!(snapshot.num_users(), 2);
        assert_eq!(snapshot.num_items(), 2);
        assert_eq!(snapshot.num_ratings(), 4);
        // First-appearance order, not sorted order
        assert_eq!(snapshot.items(), &[10, 20]);

        assert!(snapshot.knows_user(1));
        assert!(!snapshot.knows_user(3));
        let seen = snapshot.seen_by(1).unwrap();
        assert!(seen.contains(&10) && seen.contains(&20));
    }

    #[test]
    fn test_duplicate_pairs_train_as_independent_observations() {
        let mut ratings = polarized_ratings();
        ratings.push(rating(1, 10, 4.5));

        let trainer = SvdTrainer::new(test_config());
        let snapshot = trainer.train(&ratings).unwrap();

        assert_eq!(snapshot.num_ratings(), 5);
        assert_eq!(snapshot.num_items(), 2, "duplicates add no new items");
    }
}

//! Training hyperparameters.

use serde::{Deserialize, Serialize};

/// Hyperparameters for the SGD matrix-factorization trainer.
///
/// The defaults match the scale the service was tuned on: 100 latent
/// factors, 20 epochs, learning rate 0.005, regularization 0.02.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdConfig {
    /// Dimensionality of the latent vectors
    pub num_factors: usize,
    /// Number of passes over the training set
    pub epochs: usize,
    /// SGD step size
    pub learning_rate: f32,
    /// L2 penalty applied to biases and factors
    pub regularization: f32,
    /// Seed for latent-vector initialization. `Some` makes training fully
    /// deterministic; `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            num_factors: 100,
            epochs: 20,
            learning_rate: 0.005,
            regularization: 0.02,
            seed: None,
        }
    }
}

impl SvdConfig {
    /// Configure the number of latent factors
    pub fn with_num_factors(mut self, num_factors: usize) -> Self {
        self.num_factors = num_factors;
        self
    }

    /// Configure the number of training epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Configure the SGD learning rate
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Configure the regularization weight
    pub fn with_regularization(mut self, regularization: f32) -> Self {
        self.regularization = regularization;
        self
    }

    /// Fix the initialization seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

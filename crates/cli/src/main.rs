use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{EngineError, EngineService, ErrorPayload};
use factor_model::{SvdConfig, TrainError};
use ranker::RankError;
use rating_store::{DataPaths, MovieId, StoreError, UserId};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// cinerec - Movie Rating Prediction and Recommendation Engine
#[derive(Parser)]
#[command(name = "cinerec")]
#[command(about = "Movie recommendation engine using latent-factor collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the dataset directory (ratings.csv, movies.csv, new_ratings.csv)
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Fix the training seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get top-N movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        n: usize,
    },

    /// Show the most-rated movies
    Popular {
        /// Number of movies to return
        #[arg(long, default_value = "10")]
        n: usize,
    },

    /// Submit a new rating (persisted to the rating log)
    Rate {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        movie_id: MovieId,

        /// Rating value on the 0.5 - 5.0 scale
        #[arg(long)]
        rating: f32,
    },

    /// Retrain the model on the base dataset plus the rating log
    Retrain,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = SvdConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    // Load the dataset and train the initial model (this may take a moment)
    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let paths = DataPaths::from_dir(&cli.data_dir);
    let (store, catalog) = rating_store::load_dataset(&paths).context("Failed to load dataset")?;
    let service = EngineService::new(store, catalog, config)
        .await
        .context("Initial training failed")?;
    println!("{} Ready in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { user_id, n } => {
            print_outcome(service.recommend(user_id, n).await)?;
        }
        Commands::Popular { n } => {
            print_outcome(service.popular(n).await)?;
        }
        Commands::Rate {
            user_id,
            movie_id,
            rating,
        } => {
            print_outcome(service.rate(user_id, movie_id, rating).await)?;
        }
        Commands::Retrain => {
            print_outcome(service.retrain().await)?;
        }
    }

    Ok(())
}

/// Print the operation result as JSON.
///
/// Recoverable engine errors become the same `{"error": ...}` payload a
/// routing layer would serialize; anything else propagates as a real
/// failure.
fn print_outcome<T: Serialize>(outcome: engine::Result<T>) -> Result<()> {
    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) if is_recoverable(&err) => {
            let payload = ErrorPayload::from(&err);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Errors the boundary reports as payloads instead of crashing
fn is_recoverable(err: &EngineError) -> bool {
    matches!(
        err,
        EngineError::Ranking(RankError::UnknownUser { .. })
            | EngineError::Store(StoreError::InvalidRating { .. })
            | EngineError::Training(TrainError::EmptyDataset)
            | EngineError::RetrainInProgress
    )
}

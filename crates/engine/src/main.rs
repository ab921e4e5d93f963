//! Test harness for the recommendation engine.
//!
//! This binary exercises the four service operations end-to-end against a
//! dataset directory (default `data/`, override with the first argument).

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use engine::EngineService;
use factor_model::SvdConfig;
use rating_store::DataPaths;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,engine=debug,ranker=debug,factor_model=debug")
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    info!("Loading dataset from {}", data_dir.display());

    let paths = DataPaths::from_dir(&data_dir);
    let (store, catalog) =
        rating_store::load_dataset(&paths).context("Failed to load dataset")?;
    info!(
        ratings = store.base_len() + store.log_len(),
        movies = catalog.len(),
        "Dataset loaded"
    );

    info!("Training initial model...");
    let service = EngineService::new(store, catalog, SvdConfig::default())
        .await
        .context("Initial training failed")?;

    let user_id = 1;
    let limit = 10;

    info!("Top {} recommendations for user {}:", limit, user_id);
    let recommendations = service.recommend(user_id, limit).await?;
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} (movie {}) - predicted {:.2}",
            i + 1,
            rec.title,
            rec.movie_id,
            rec.predicted_rating
        );
    }

    info!("Most popular movies:");
    let popular = service.popular(10).await?;
    for (i, movie) in popular.iter().enumerate() {
        info!("{}. {} (movie {})", i + 1, movie.title, movie.movie_id);
    }

    // Submit a rating and retrain so the next recommendation pass sees it
    let ack = service.rate(user_id, 31, 4.5).await?;
    info!("{} ({} -> movie {})", ack.message, ack.user_id, ack.movie_id);

    let report = service.retrain().await?;
    info!("{}", report.message);

    let refreshed = service.recommend(user_id, limit).await?;
    info!(
        "After retrain, top recommendation for user {}: {:?}",
        user_id,
        refreshed.first().map(|r| r.title.as_str())
    );

    Ok(())
}

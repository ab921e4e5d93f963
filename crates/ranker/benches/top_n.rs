//! Benchmarks for candidate scoring and ranking
//!
//! Run with: cargo bench --package ranker
//!
//! Uses a synthetic dataset so the benchmark is self-contained.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use factor_model::{ModelSnapshot, SvdConfig, SvdTrainer};
use rating_store::{Movie, MovieCatalog, Rating};

const USERS: u32 = 500;
const MOVIES: u32 = 2000;

fn synthetic_ratings() -> Vec<Rating> {
    let mut ratings = Vec::new();
    for user_id in 1..=USERS {
        for movie_id in 1..=MOVIES {
            // Skip a third of the grid so every user has unseen candidates
            if (user_id + movie_id) % 3 == 0 {
                continue;
            }
            let rating = 0.5 + ((user_id * 7 + movie_id * 13) % 10) as f32 * 0.5;
            ratings.push(Rating {
                user_id,
                movie_id,
                rating,
            });
        }
    }
    ratings
}

fn synthetic_catalog() -> MovieCatalog {
    MovieCatalog::new(
        (1..=MOVIES)
            .map(|id| Movie {
                id,
                title: format!("Movie {id}"),
                genres: vec!["Drama".to_string()],
            })
            .collect(),
    )
}

fn trained_snapshot(ratings: &[Rating]) -> ModelSnapshot {
    let config = SvdConfig::default()
        .with_num_factors(32)
        .with_epochs(2)
        .with_seed(42);
    SvdTrainer::new(config)
        .train(ratings)
        .expect("training failed")
}

fn bench_top_n(c: &mut Criterion) {
    let ratings = synthetic_ratings();
    let catalog = synthetic_catalog();
    let snapshot = trained_snapshot(&ratings);

    c.bench_function("top_n_10_of_2000", |b| {
        b.iter(|| {
            let ranked = ranker::top_n(
                black_box(&snapshot),
                black_box(&catalog),
                black_box(1),
                black_box(10),
            )
            .unwrap();
            black_box(ranked)
        })
    });
}

fn bench_popular(c: &mut Criterion) {
    let ratings = synthetic_ratings();
    let catalog = synthetic_catalog();

    c.bench_function("popular_10", |b| {
        b.iter(|| {
            let ranked = ranker::popular(black_box(&ratings), black_box(&catalog), black_box(10));
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_top_n, bench_popular);
criterion_main!(benches);

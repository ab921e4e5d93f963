//! The rating store: immutable base dataset plus the durable append-only
//! log of newly submitted ratings.
//!
//! The store is the single source of truth for training input. The base
//! portion is loaded once at startup; the log grows through [`RatingStore::
//! append`], which persists each record before it becomes visible to
//! readers. [`RatingStore::merged_view`] concatenates base and log as of
//! the call instant.

use crate::error::{Result, StoreError};
use crate::parser;
use crate::types::{validate_rating, MovieId, Rating, UserId};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Conventional file locations under a dataset directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub ratings: PathBuf,
    pub movies: PathBuf,
    pub rating_log: PathBuf,
}

impl DataPaths {
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            ratings: dir.join("ratings.csv"),
            movies: dir.join("movies.csv"),
            rating_log: dir.join("new_ratings.csv"),
        }
    }
}

const LOG_HEADER: &str = "userId,movieId,rating";

#[derive(Debug)]
pub struct RatingStore {
    base: Vec<Rating>,
    log_path: PathBuf,
    /// Mutable tail of the dataset. One mutex guards both the in-memory
    /// entries and the file writes, so an append is atomic with respect to
    /// readers and other appenders.
    log: Mutex<Vec<Rating>>,
}

impl RatingStore {
    /// Open the store: read the immutable base dataset and any existing
    /// rating log.
    ///
    /// A missing base file is fatal ([`StoreError::DataUnavailable`]); a
    /// missing log just means no ratings have been submitted yet.
    pub fn open(base_path: &Path, log_path: &Path) -> Result<Self> {
        let base = parser::parse_ratings(base_path).map_err(|e| match e {
            StoreError::Io(io) if io.kind() == ErrorKind::NotFound => StoreError::DataUnavailable {
                path: base_path.display().to_string(),
            },
            other => other,
        })?;

        let entries = if log_path.exists() {
            parser::parse_ratings(log_path)?
        } else {
            Vec::new()
        };

        info!(
            base = base.len(),
            log = entries.len(),
            "rating store opened"
        );

        Ok(Self {
            base,
            log_path: log_path.to_path_buf(),
            log: Mutex::new(entries),
        })
    }

    /// Validate and append a new rating.
    ///
    /// The record is written and flushed to the log file before it is
    /// visible in memory, so a rating acknowledged to the caller survives a
    /// restart. The log file is created with a header row on first append.
    pub fn append(&self, user_id: UserId, movie_id: MovieId, rating: f32) -> Result<Rating> {
        validate_rating(rating)?;

        let record = Rating {
            user_id,
            movie_id,
            rating,
        };

        let mut log = self.log.lock().expect("rating log mutex poisoned");
        let mut file = self.open_log_file()?;
        writeln!(file, "{user_id},{movie_id},{rating}")?;
        file.sync_data()?;
        log.push(record);

        debug!(user_id, movie_id, rating, "rating appended");
        Ok(record)
    }

    fn open_log_file(&self) -> Result<File> {
        let new_file = !self.log_path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        if new_file {
            writeln!(file, "{LOG_HEADER}")?;
        }
        Ok(file)
    }

    /// Base and log concatenated, in that order, as of the call instant.
    /// Duplicate (user, movie) pairs are preserved.
    pub fn merged_view(&self) -> Vec<Rating> {
        let log = self.log.lock().expect("rating log mutex poisoned");
        let mut merged = Vec::with_capacity(self.base.len() + log.len());
        merged.extend_from_slice(&self.base);
        merged.extend_from_slice(&log);
        merged
    }

    /// Snapshot of the log entries, oldest first.
    pub fn log_entries(&self) -> Vec<Rating> {
        self.log.lock().expect("rating log mutex poisoned").clone()
    }

    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    pub fn log_len(&self) -> usize {
        self.log.lock().expect("rating log mutex poisoned").len()
    }
}

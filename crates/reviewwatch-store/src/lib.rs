//! Durable per-app store of review ids that have already been reported.
//!
//! Backed by one SQLite database file per application id. The single
//! `seen_reviews` table holds the review id as its primary key, so the
//! insert-if-absent check rides entirely on the uniqueness constraint: a
//! constraint violation is the in-band "already seen" signal, never an
//! error. Only identifiers are persisted — review content is cheap to
//! re-fetch, deduplication is the only durable concern.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use reviewwatch_core::AppId;

const MAX_CONNECTIONS: u32 = 4;
const BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create data directory {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Durable set of review ids already reported for one app.
///
/// Survives process restarts; grows monotonically. `Clone` hands out another
/// handle to the same pool.
#[derive(Clone)]
pub struct SeenStore {
    pool: SqlitePool,
}

impl SeenStore {
    /// Path of the backing database file for `app_id` under `data_dir`.
    #[must_use]
    pub fn database_path(data_dir: &Path, app_id: &AppId) -> PathBuf {
        data_dir.join(format!("reviews{}.db", app_id.as_str()))
    }

    /// Opens the seen store for one app, creating the data directory, the
    /// database file, and the schema on first use.
    ///
    /// Idempotent — safe to call every run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDataDir`] if the data directory cannot be
    /// created, or [`StoreError::Sqlx`] if the database cannot be opened or
    /// the schema cannot be ensured.
    pub async fn open_for_app(data_dir: &Path, app_id: &AppId) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StoreError::CreateDataDir {
                path: data_dir.to_path_buf(),
                source,
            })?;
        let path = Self::database_path(data_dir, app_id);
        tracing::debug!(path = %path.display(), "opening seen store");
        Self::open(&path).await
    }

    /// Opens a seen store at an explicit database path, creating file and
    /// schema if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if the database cannot be opened or the
    /// schema cannot be ensured.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        sqlx::query("CREATE TABLE IF NOT EXISTS seen_reviews (review_id INTEGER PRIMARY KEY)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Atomically marks `review_id` as seen.
    ///
    /// Returns `true` if the id was absent and has now been recorded, `false`
    /// if it was already present (the store is left unchanged). Concurrent
    /// calls for the same id resolve to exactly one `true`: the primary-key
    /// constraint arbitrates, and the losing insert's violation is translated
    /// here rather than surfaced as a failure.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] on any database failure other than a
    /// uniqueness violation.
    pub async fn try_mark_seen(&self, review_id: i64) -> Result<bool, StoreError> {
        match sqlx::query("INSERT INTO seen_reviews (review_id) VALUES (?1)")
            .bind(review_id)
            .execute(&self.pool)
            .await
        {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(StoreError::Sqlx(e)),
        }
    }

    /// Whether `review_id` has already been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if the query fails.
    pub async fn contains(&self, review_id: i64) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM seen_reviews WHERE review_id = ?1",
        )
        .bind(review_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Number of review ids recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if the query fails.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seen_reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

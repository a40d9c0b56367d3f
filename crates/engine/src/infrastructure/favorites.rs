//! SQLite-backed favorites storage.
//!
//! Uniqueness of the upstream event id is a `UNIQUE` column constraint, and
//! inserts go through `ON CONFLICT DO NOTHING`, so racing adds of the same id
//! resolve inside SQLite rather than in application code.

use async_trait::async_trait;
use eventscout_domain::{EventId, FavoriteEvent};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::ports::{FavoriteRepo, InsertOutcome, RepoError};

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite implementation for favorite event storage.
pub struct SqliteFavoriteRepo {
    pool: SqlitePool,
}

impl SqliteFavoriteRepo {
    /// Open (creating if needed) a database file.
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path))
            .map_err(|e| RepoError::database("favorites", e))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("favorites", e))?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, mostly for tests.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::database("favorites", e))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("favorites", e))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        // seq gives a stable insertion order even when addedAt values collide
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                event_id TEXT NOT NULL UNIQUE,
                document TEXT NOT NULL,
                added_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("favorites", e))?;

        Ok(Self { pool })
    }
}

fn favorite_from_row(row: &SqliteRow) -> Result<FavoriteEvent, RepoError> {
    let document: String = row
        .try_get("document")
        .map_err(|e| RepoError::database("list_favorites", e))?;
    serde_json::from_str(&document).map_err(RepoError::serialization)
}

#[async_trait]
impl FavoriteRepo for SqliteFavoriteRepo {
    async fn list(&self) -> Result<Vec<FavoriteEvent>, RepoError> {
        let rows = sqlx::query("SELECT document FROM favorites ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_favorites", e))?;

        rows.iter().map(favorite_from_row).collect()
    }

    async fn insert_if_absent(&self, favorite: &FavoriteEvent) -> Result<InsertOutcome, RepoError> {
        let document = serde_json::to_string(favorite).map_err(RepoError::serialization)?;

        let result = sqlx::query(
            r#"
            INSERT INTO favorites (event_id, document, added_at)
            VALUES (?, ?, ?)
            ON CONFLICT(event_id) DO NOTHING
            "#,
        )
        .bind(favorite.id().as_str())
        .bind(document)
        .bind(favorite.added_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_favorite", e))?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::AlreadyPresent)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn delete(&self, id: &EventId) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM favorites WHERE event_id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_favorite", e))?;
        Ok(result.rows_affected())
    }

    async fn contains(&self, id: &EventId) -> Result<bool, RepoError> {
        let row = sqlx::query("SELECT 1 FROM favorites WHERE event_id = ? LIMIT 1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("contains_favorite", e))?;
        Ok(row.is_some())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM favorites")
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("clear_favorites", e))?;
        Ok(result.rows_affected())
    }
}

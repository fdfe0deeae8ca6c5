//! Local persistence for the flow host.
//!
//! A single SQLite database (WAL mode) holds the local key-value slots.
//! The only slot with a cross-session lifecycle is the auth uid under
//! [`AUTH_UID_KEY`]: written after a successful sign-in or registration,
//! read once at launch by the bootstrap resolver, and cleared on sign-out.

use anyhow::{Context as _, Result};
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::{path::Path, str::FromStr};

/// Key of the persisted session identifier slot.
pub const AUTH_UID_KEY: &str = "zynko.auth.uid";

/// Default timeout for individual SQLite queries.
/// Prevents a hung query from wedging the launch sequence.
const QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Execute a future with the standard query timeout.
async fn with_timeout<T>(fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "database query timed out after {}s",
            QUERY_TIMEOUT.as_secs()
        )),
    }
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (or create) the database under `data_dir`.
    pub async fn new(data_dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db_path = data_dir.join("zynkod.db");
        let opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Return a clone of the connection pool (cheap — Arc-backed).
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("src/storage/migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ─── Local slots ────────────────────────────────────────────────────────

    pub async fn set_slot(&self, key: &str, value: &str) -> Result<()> {
        with_timeout(async {
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                "INSERT INTO local_slots (key, value, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&self.pool)
            .await?;
            Ok(())
        })
        .await
    }

    pub async fn get_slot(&self, key: &str) -> Result<Option<String>> {
        with_timeout(async {
            let row: Option<(String,)> =
                sqlx::query_as("SELECT value FROM local_slots WHERE key = ?")
                    .bind(key)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row.map(|(v,)| v))
        })
        .await
    }

    pub async fn clear_slot(&self, key: &str) -> Result<()> {
        with_timeout(async {
            sqlx::query("DELETE FROM local_slots WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
        .await
    }

    // ─── Auth uid convenience wrappers ──────────────────────────────────────
    //
    // Storage failures here are non-fatal by contract: callers log and
    // continue, the launch sequence treats an error as "no uid".

    pub async fn save_uid(&self, uid: &str) -> Result<()> {
        self.set_slot(AUTH_UID_KEY, uid).await
    }

    pub async fn get_uid(&self) -> Result<Option<String>> {
        self.get_slot(AUTH_UID_KEY).await
    }

    pub async fn clear_uid(&self) -> Result<()> {
        self.clear_slot(AUTH_UID_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn uid_roundtrip() {
        let (_dir, storage) = scratch().await;
        assert_eq!(storage.get_uid().await.unwrap(), None);

        storage.save_uid("u123").await.unwrap();
        assert_eq!(storage.get_uid().await.unwrap(), Some("u123".to_string()));

        // Overwrite keeps a single slot
        storage.save_uid("u456").await.unwrap();
        assert_eq!(storage.get_uid().await.unwrap(), Some("u456".to_string()));

        storage.clear_uid().await.unwrap();
        assert_eq!(storage.get_uid().await.unwrap(), None);
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let (_dir, storage) = scratch().await;
        storage.set_slot("a", "1").await.unwrap();
        storage.set_slot("b", "2").await.unwrap();
        storage.clear_slot("a").await.unwrap();
        assert_eq!(storage.get_slot("a").await.unwrap(), None);
        assert_eq!(storage.get_slot("b").await.unwrap(), Some("2".to_string()));
    }
}

//! SQLite-backed URL → key store.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Handle to one progress store. Cheap to clone; clones share the pool, so
/// concurrent point reads/writes from many workers are safe.
#[derive(Clone)]
pub struct ProgressStore {
    pub(crate) pool: Pool<Sqlite>,
}

impl ProgressStore {
    /// Open (or create) the store at `path`. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .with_context(|| format!("open progress store {}", path.display()))?;
        let store = ProgressStore { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS progress (
                url TEXT PRIMARY KEY NOT NULL,
                key TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Key recorded for `url`, if any.
    pub async fn get(&self, url: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT key FROM progress WHERE url = ?1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("key")))
    }

    /// True only if `url` is recorded under exactly `key`. A record under a
    /// different key means the target changed and the URL is not done.
    pub async fn is_recorded(&self, url: &str, key: &str) -> Result<bool> {
        Ok(self.get(url).await?.as_deref() == Some(key))
    }

    /// Record `url → key`, overwriting any previous key.
    pub async fn put(&self, url: &str, key: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO progress (url, key, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(url) DO UPDATE SET
                key = excluded.key,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(url)
        .bind(key)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Number of records.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM progress")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("n"))
    }

    /// Wait for in-flight statements and close all connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Current time as Unix seconds (for record timestamps).
fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory store for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<ProgressStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = ProgressStore { pool };
    store.migrate().await?;
    Ok(store)
}

//! `SQLite` implementation of [`OptionsStore`].

use sqlx::SqlitePool;

use gridminer_app::ports::OptionsStore;
use gridminer_domain::error::GridMinerError;
use gridminer_domain::options::EntryOptions;

use crate::error::StorageError;

/// `SQLite`-backed options store, one row per `(entry_id, key)`.
pub struct SqliteOptionsStore {
    pool: SqlitePool,
}

impl SqliteOptionsStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl OptionsStore for SqliteOptionsStore {
    async fn load(&self, entry_id: &str) -> Result<EntryOptions, GridMinerError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM entry_options WHERE entry_id = ? ORDER BY key")
                .bind(entry_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;

        let options = rows
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_str::<serde_json::Value>(&value).map(|value| (key, value))
            })
            .collect::<Result<EntryOptions, _>>()
            .map_err(StorageError::from)?;
        Ok(options)
    }

    async fn save(&self, entry_id: &str, options: &EntryOptions) -> Result<(), GridMinerError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        for (key, value) in options.iter() {
            let value_json = serde_json::to_string(value).map_err(StorageError::from)?;
            sqlx::query(
                "INSERT INTO entry_options (entry_id, key, value) VALUES (?, ?, ?) \
                 ON CONFLICT (entry_id, key) DO UPDATE SET value = excluded.value",
            )
            .bind(entry_id)
            .bind(key)
            .bind(&value_json)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}

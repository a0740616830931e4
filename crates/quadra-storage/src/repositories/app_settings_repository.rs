//! SQLite implementation of AppSettingsRepository.
//!
//! Key-value store for application-wide settings.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use quadra_core::AppSettingsRepository;
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use crate::Database;

/// SQLite-backed app settings repository.
///
/// Keys use dot-notation namespacing, e.g. `catalog.listing_policy` or
/// `catalog.nearby_radius_km`.
pub struct SqliteAppSettingsRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteAppSettingsRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppSettingsRepository for SqliteAppSettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;

        let value = db
            .connection()
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "INSERT INTO app_settings (key, value, updated_at)
             VALUES (?, ?, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;

        debug!(key, value, "[Settings] Stored setting");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute("DELETE FROM app_settings WHERE key = ?", params![key])?;
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let pattern = format!(
            "{}%",
            prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        );

        let mut stmt = conn.prepare(
            "SELECT key, value FROM app_settings WHERE key LIKE ? ESCAPE '\\' ORDER BY key",
        )?;
        let rows = stmt
            .query_map(params![pattern], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

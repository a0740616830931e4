//! Database manager for SQLite storage.
//!
//! ## Migration System
//!
//! Migrations are numbered sequentially (001, 002, ...) and live in the
//! `migrations/` directory. Each one runs exactly once, tracked via the
//! `schema_migrations` table.
//!
//! To add a new migration:
//! 1. Create `migrations/NNN_description.sql`
//! 2. Append it to `MIGRATIONS` below
//! 3. It runs the next time a database is opened

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, error, info};

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("migrations/001_initial.sql"),
}];

/// SQLite database wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path, creating it if needed.
    ///
    /// Pending migrations are applied before returning.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!(path = ?path, "Opened database");

        let db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        debug!("Opened in-memory database");

        let db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL
            )",
            [],
        )?;

        let current_version = self.schema_version()?;
        let latest = MIGRATIONS.last().map(|m| m.version).unwrap_or(0);
        debug!(current_version, latest, "Checking database schema");

        for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
            info!(
                version = migration.version,
                name = migration.name,
                "Running migration"
            );

            let tx = self.conn.unchecked_transaction()?;

            if let Err(e) = self.conn.execute_batch(migration.sql) {
                error!(
                    version = migration.version,
                    name = migration.name,
                    error = %e,
                    "Migration failed"
                );
                return Err(anyhow::anyhow!(
                    "Failed to run migration {} ({}): {}",
                    migration.version,
                    migration.name,
                    e
                ));
            }

            self.conn.execute(
                "INSERT OR REPLACE INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, datetime('now'))",
                rusqlite::params![migration.version, migration.name],
            )?;

            tx.commit()?;
        }

        Ok(())
    }

    /// Highest applied migration, 0 for a fresh database.
    pub fn schema_version(&self) -> Result<i64> {
        let version = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

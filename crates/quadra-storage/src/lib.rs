//! Quadra Storage Layer
//!
//! SQLite-backed document store for the space catalogue, plus local
//! accounts and key-value settings.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Use cases (quadra-core)              │
//! ├──────────────────────────────────────────────────────┤
//! │               Repository Traits                      │
//! │   (SpaceRepository, AuthProvider, AppSettings...)    │
//! ├──────────────────────────────────────────────────────┤
//! │            SQLite Implementations                    │
//! │  (SqliteSpaceRepository, SqliteAuthProvider, ...)    │
//! ├──────────────────────────────────────────────────────┤
//! │          PasswordHasher (PBKDF2-HMAC-SHA256)         │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │                   (SQLite)                           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each space is stored as a JSON document. Name, price and rating are
//! projected into columns, and the `sports` array is indexed in a side
//! table, so filtered and sorted queries run in SQL.
//!
//! # Usage
//!
//! ```rust,ignore
//! use quadra_storage::{Database, SqliteSpaceRepository, SqliteAuthProvider};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Database::open(&path)?;
//! let db = Arc::new(Mutex::new(db));
//!
//! let space_repo = SqliteSpaceRepository::new(db.clone());
//! let auth = SqliteAuthProvider::new(db.clone());
//! ```

pub mod crypto;
mod database;
mod repositories;

pub use crypto::{PasswordHash, PasswordHasher, DEFAULT_PBKDF2_ITERATIONS, SALT_SIZE};
pub use database::Database;
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "quadra.db";

/// Environment variable overriding the database location.
pub const DATABASE_ENV: &str = "QUADRA_DB";

/// Per-user data directory for the current platform.
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|p| p.join("quadra"))
}

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<std::path::PathBuf> {
    default_data_dir().map(|p| p.join(DATABASE_FILE))
}

/// Resolve the database path: `QUADRA_DB` when set, otherwise the platform default.
pub fn resolve_database_path() -> Option<std::path::PathBuf> {
    match std::env::var_os(DATABASE_ENV) {
        Some(path) if !path.is_empty() => Some(std::path::PathBuf::from(path)),
        _ => default_database_path(),
    }
}

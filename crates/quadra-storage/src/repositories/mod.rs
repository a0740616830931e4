//! Repository implementations using SQLite.

mod app_settings_repository;
mod auth_provider;
mod space_repository;
mod store_error;

pub use app_settings_repository::SqliteAppSettingsRepository;
pub use auth_provider::SqliteAuthProvider;
pub use space_repository::{filter_query, SqliteSpaceRepository};

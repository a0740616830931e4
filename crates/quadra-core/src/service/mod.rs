//! Domain services
//!
//! Business logic that operates on repositories but belongs to no single use case.

pub mod app_settings_service;

pub use app_settings_service::{keys, AppSettingsService};

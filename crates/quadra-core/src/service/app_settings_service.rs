//! App Settings Service
//!
//! Typed access to persisted settings on top of [`AppSettingsRepository`].

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::ListingPolicy;
use crate::AppSettingsRepository;

/// Setting key constants for type-safe access.
pub mod keys {
    /// Catalogue settings namespace
    pub mod catalog {
        /// Listing rules for the full catalogue ("repository_order", "rated_first")
        pub const LISTING_POLICY: &str = "catalog.listing_policy";
        /// Default proximity radius in km (f64)
        pub const NEARBY_RADIUS_KM: &str = "catalog.nearby_radius_km";
    }
}

/// Service for managing application settings with typed access.
///
/// # Example
/// ```ignore
/// let service = AppSettingsService::new(repo);
///
/// let policy = service.get_listing_policy().await;
/// service.set_nearby_radius_km(5.0).await?;
/// ```
pub struct AppSettingsService {
    repository: Arc<dyn AppSettingsRepository>,
}

impl AppSettingsService {
    /// Default proximity radius (10 km)
    pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

    pub fn new(repository: Arc<dyn AppSettingsRepository>) -> Self {
        Self { repository }
    }

    /// Get a setting value parsed as the specified type.
    ///
    /// Returns `None` if the key doesn't exist or parsing fails.
    pub async fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.repository.get(key).await {
            Ok(Some(value)) => {
                if let Ok(parsed) = serde_json::from_str(&value) {
                    return Some(parsed);
                }
                // Bare strings are stored without quotes
                if let Ok(parsed) = serde_json::from_str(&format!("\"{}\"", value)) {
                    return Some(parsed);
                }
                warn!("[Settings] Failed to parse '{}' value: {}", key, value);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("[Settings] Failed to get '{}': {}", key, e);
                None
            }
        }
    }

    /// Set a setting value, serializing it appropriately.
    pub async fn set_typed<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(value)?;
        let clean_value = serialized.trim_matches('"');
        self.repository.set(key, clean_value).await
    }

    pub async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.repository.delete(key).await
    }

    /// Listing rules for the full catalogue (default: repository order).
    pub async fn get_listing_policy(&self) -> ListingPolicy {
        self.get_typed(keys::catalog::LISTING_POLICY)
            .await
            .unwrap_or_default()
    }

    pub async fn set_listing_policy(&self, policy: ListingPolicy) -> anyhow::Result<()> {
        info!("[Settings] Setting listing policy to {}", policy);
        self.set_typed(keys::catalog::LISTING_POLICY, &policy).await
    }

    pub async fn get_nearby_radius_km(&self) -> f64 {
        self.get_typed(keys::catalog::NEARBY_RADIUS_KM)
            .await
            .filter(|radius: &f64| radius.is_finite() && *radius > 0.0)
            .unwrap_or(Self::DEFAULT_NEARBY_RADIUS_KM)
    }

    pub async fn set_nearby_radius_km(&self, radius_km: f64) -> anyhow::Result<()> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            anyhow::bail!("Nearby radius must be a positive number of kilometres");
        }
        info!("[Settings] Setting nearby radius to {} km", radius_km);
        self.set_typed(keys::catalog::NEARBY_RADIUS_KM, &radius_km)
            .await
    }

    /// List settings by namespace prefix.
    pub async fn list_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<(String, String)>> {
        self.repository.list_by_prefix(prefix).await
    }
}

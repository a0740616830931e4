//! Repository traits for data access
//!
//! These traits define the interface for data storage without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;

use crate::domain::{
    AuthError, DecodeError, ProfileUpdate, SortField, SortOrder, Space, SpaceFilters, UserProfile,
};

/// Result cap for filtered and per-sport queries.
pub const FILTER_PAGE_SIZE: usize = 20;

/// Result cap for sorted listings.
pub const SORTED_PAGE_SIZE: usize = 50;

/// Coarse failure category of a repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryErrorKind {
    Unavailable,
    NotFound,
    PermissionDenied,
    Malformed,
}

/// Errors surfaced by [`SpaceRepository`] implementations.
///
/// Store-specific error types never cross this boundary: implementations log
/// the underlying error and keep only the category.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to communicate with the space store during {operation}")]
    Unavailable { operation: String },

    #[error("space not found: {id}")]
    NotFound { id: String },

    #[error("the space store denied {operation}")]
    PermissionDenied { operation: String },

    #[error("the space store returned an unreadable record: {0}")]
    Malformed(#[from] DecodeError),
}

impl RepositoryError {
    pub fn unavailable(operation: impl Into<String>) -> Self {
        Self::Unavailable {
            operation: operation.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn permission_denied(operation: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
        }
    }

    pub fn kind(&self) -> RepositoryErrorKind {
        match self {
            Self::Unavailable { .. } => RepositoryErrorKind::Unavailable,
            Self::NotFound { .. } => RepositoryErrorKind::NotFound,
            Self::PermissionDenied { .. } => RepositoryErrorKind::PermissionDenied,
            Self::Malformed(_) => RepositoryErrorKind::Malformed,
        }
    }

    /// Only transport-level failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.kind() == RepositoryErrorKind::Unavailable
    }
}

/// Result type for space repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Space repository trait
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Get all spaces in store order
    async fn find_all(&self) -> RepoResult<Vec<Space>>;

    /// Get spaces matching every present filter, best rated first,
    /// capped at [`FILTER_PAGE_SIZE`]
    async fn find_by_filters(&self, filters: &SpaceFilters) -> RepoResult<Vec<Space>>;

    /// Get a space by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Space>>;

    /// Get spaces within `radius_km` of a point, in store order.
    ///
    /// Scans the whole collection; there is no spatial index behind this.
    async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> RepoResult<Vec<Space>>;

    /// Get spaces offering `sport`, best rated first, capped at
    /// [`FILTER_PAGE_SIZE`]
    async fn find_by_sport(&self, sport: &str) -> RepoResult<Vec<Space>>;

    /// Get all spaces ordered by `field`, capped at [`SORTED_PAGE_SIZE`]
    async fn find_all_sorted(&self, field: SortField, order: SortOrder)
        -> RepoResult<Vec<Space>>;

    /// Create a new space
    async fn create(&self, space: &Space) -> RepoResult<()>;

    /// Replace an existing space
    async fn update(&self, space: &Space) -> RepoResult<()>;

    /// Delete a space (no-op when absent)
    async fn delete(&self, id: &str) -> RepoResult<()>;
}

/// Authentication backend.
///
/// Sessions are not tracked here; `AuthContext` owns the signed-in user.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and return the matching profile
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    /// Register a new account
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile, AuthError>;

    /// Replace the password after checking the current one
    async fn change_password(
        &self,
        uid: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Apply a partial profile edit and return the stored result
    async fn update_profile(
        &self,
        uid: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AuthError>;

    /// Get a profile by uid
    async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, AuthError>;
}

/// App Settings repository trait
///
/// Key-value store for application-wide settings.
///
/// # Key Naming Convention
/// Use dot-notation for namespacing:
/// - `catalog.listing_policy` - Ranking rules for the full listing
/// - `catalog.nearby_radius_km` - Default radius for proximity search
#[async_trait]
pub trait AppSettingsRepository: Send + Sync {
    /// Get a setting value by key
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Set a setting value (insert or update)
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Delete a setting by key
    async fn delete(&self, key: &str) -> anyhow::Result<()>;

    /// Get all settings with a given prefix (e.g., "catalog." returns all catalog settings)
    async fn list_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<(String, String)>>;
}

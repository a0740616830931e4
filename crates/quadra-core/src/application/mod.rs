//! Application Services - use cases and the composition root
//!
//! Use cases sit between the presentation layer (controller, CLI) and the
//! domain layer (repositories). They:
//!
//! 1. **Validate** inputs before anything reaches storage
//! 2. **Apply** ranking and listing rules
//! 3. **Translate** repository failures into user-facing errors
//!
//! # Architecture
//!
//! ```text
//! Presentation Layer (SpaceController, CLI)
//!         │
//!         ▼
//! ┌─────────────────────────────────────┐
//! │          Use Cases                  │
//! │  GetSpacesUseCase                   │
//! │  GetSpacesByFilterUseCase           │
//! │  GetSpaceByIdUseCase                │
//! │  GetNearbySpacesUseCase             │
//! └─────────────────────────────────────┘
//!         │
//!         ▼
//! Domain Layer (SpaceRepository)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let services = ApplicationServicesBuilder::new()
//!     .with_space_repo(space_repo)
//!     .with_listing_policy(settings.get_listing_policy().await)
//!     .build()?;
//!
//! let spaces = services.controller.list().await?;
//! ```

mod auth;
mod error;
mod get_nearby_spaces;
mod get_space_by_id;
mod get_spaces;
mod get_spaces_by_filter;

pub use auth::AuthContext;
pub use error::*;
pub use get_nearby_spaces::GetNearbySpacesUseCase;
pub use get_space_by_id::GetSpaceByIdUseCase;
pub use get_spaces::{GetSpacesUseCase, ListingPolicy, MIN_LISTED_RATING};
pub use get_spaces_by_filter::{
    boosted_rating, rank_by_boosted_rating, rank_by_sport, GetSpacesByFilterUseCase,
    BOOST_THRESHOLD, RATING_BOOST,
};

use std::sync::Arc;

use mockable::DefaultClock;

use crate::presentation::{SharedClock, SpaceController};
use crate::repository::{AuthProvider, SpaceRepository};

/// Builder for the application graph.
///
/// The entry point builds this once and passes [`ApplicationServices`] down;
/// tests build their own graph instead of resetting shared state.
pub struct ApplicationServicesBuilder {
    space_repo: Option<Arc<dyn SpaceRepository>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    clock: Option<SharedClock>,
    listing_policy: ListingPolicy,
}

impl ApplicationServicesBuilder {
    pub fn new() -> Self {
        Self {
            space_repo: None,
            auth_provider: None,
            clock: None,
            listing_policy: ListingPolicy::default(),
        }
    }

    pub fn with_space_repo(mut self, repo: Arc<dyn SpaceRepository>) -> Self {
        self.space_repo = Some(repo);
        self
    }

    pub fn with_auth_provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_listing_policy(mut self, policy: ListingPolicy) -> Self {
        self.listing_policy = policy;
        self
    }

    /// Build all application services
    pub fn build(self) -> anyhow::Result<ApplicationServices> {
        let space_repo = self
            .space_repo
            .ok_or_else(|| anyhow::anyhow!("Space repository required"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(DefaultClock));

        let get_spaces = Arc::new(GetSpacesUseCase::new(
            space_repo.clone(),
            self.listing_policy,
        ));
        let get_spaces_by_filter = Arc::new(GetSpacesByFilterUseCase::new(space_repo.clone()));
        let get_space_by_id = Arc::new(GetSpaceByIdUseCase::new(space_repo.clone()));
        let get_nearby_spaces = Arc::new(GetNearbySpacesUseCase::new(space_repo.clone()));

        let controller = Arc::new(SpaceController::new(
            get_spaces.clone(),
            get_spaces_by_filter.clone(),
            get_space_by_id.clone(),
            get_nearby_spaces.clone(),
            clock,
        ));

        Ok(ApplicationServices {
            space_repo,
            get_spaces,
            get_spaces_by_filter,
            get_space_by_id,
            get_nearby_spaces,
            controller,
            auth: self.auth_provider.map(AuthContext::new),
        })
    }
}

impl Default for ApplicationServicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for the wired application graph
pub struct ApplicationServices {
    /// Storage seam, for callers that need raw repository queries
    pub space_repo: Arc<dyn SpaceRepository>,
    pub get_spaces: Arc<GetSpacesUseCase>,
    pub get_spaces_by_filter: Arc<GetSpacesByFilterUseCase>,
    pub get_space_by_id: Arc<GetSpaceByIdUseCase>,
    pub get_nearby_spaces: Arc<GetNearbySpacesUseCase>,
    pub controller: Arc<SpaceController>,
    /// Present only when an auth provider was supplied
    pub auth: Option<AuthContext>,
}

impl ApplicationServices {
    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }
}

//! # Quadra Core Library
//!
//! Domain logic, entities, and business rules for the Quadra sports-facility
//! catalogue.
//!
//! ## Modules
//!
//! - `domain` - Core entities (Space, UserProfile) and value objects
//! - `repository` - Data access traits
//! - `application` - Use cases, auth context, and the composition root
//! - `presentation` - Controller and view models
//! - `service` - Domain services (typed settings)

pub mod application;
pub mod domain;
pub mod presentation;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use repository::*;
pub use service::*;

pub use application::{
    ApplicationServices, ApplicationServicesBuilder, AuthContext, GetNearbySpacesUseCase,
    GetSpaceByIdUseCase, GetSpacesByFilterUseCase, GetSpacesUseCase, ListingPolicy, UseCaseError,
};
pub use presentation::{SharedClock, SpaceController, SpaceViewModel};

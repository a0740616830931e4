//! Domain entities, value objects, and errors
//!
//! This module contains all domain-level types for Quadra:
//! - Entities (Space, UserProfile)
//! - Value Objects (OpeningHours, Coordinates, SpaceFilters)
//! - Errors (DecodeError, ValidationError, AuthError)

mod error;
mod filters;
pub mod geo;
mod space;
mod user;

pub use error::{DecodeError, ValidationError};
pub use filters::*;
pub use geo::{haversine_km, Coordinates, EARTH_RADIUS_KM};
pub use space::*;
pub use user::*;

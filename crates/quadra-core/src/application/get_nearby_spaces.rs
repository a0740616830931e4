//! Proximity search

use std::sync::Arc;

use tracing::{debug, warn};

use super::error::{UseCaseError, NEARBY_SPACES_FAILED};
use crate::domain::geo::{is_valid_latitude, is_valid_longitude};
use crate::domain::{Space, ValidationError};
use crate::repository::SpaceRepository;

pub struct GetNearbySpacesUseCase {
    repository: Arc<dyn SpaceRepository>,
}

impl GetNearbySpacesUseCase {
    pub fn new(repository: Arc<dyn SpaceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Space>, UseCaseError> {
        if !is_valid_latitude(latitude) {
            return Err(ValidationError::InvalidLatitude(latitude).into());
        }
        if !is_valid_longitude(longitude) {
            return Err(ValidationError::InvalidLongitude(longitude).into());
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ValidationError::InvalidRadius(radius_km).into());
        }

        let spaces = self
            .repository
            .find_nearby(latitude, longitude, radius_km)
            .await
            .map_err(|e| {
                warn!(error = %e, "[GetNearbySpacesUseCase] Proximity search failed");
                UseCaseError::repository(NEARBY_SPACES_FAILED, e)
            })?;

        debug!(
            latitude,
            longitude,
            radius_km,
            count = spaces.len(),
            "[GetNearbySpacesUseCase] Found nearby spaces"
        );
        Ok(spaces)
    }
}

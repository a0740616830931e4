//! Presentation layer - maps use-case results into view models
//!
//! No caching: every call re-runs the use case and re-reads the clock.

mod view_model;

pub use view_model::{format_price, SpaceViewModel};

use std::sync::Arc;

use mockable::Clock;

use crate::application::{
    GetNearbySpacesUseCase, GetSpaceByIdUseCase, GetSpacesByFilterUseCase, GetSpacesUseCase,
    UseCaseError,
};
use crate::domain::{Space, SpaceFilters};

/// Wall clock shared across the graph; injectable for tests.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

pub struct SpaceController {
    get_spaces: Arc<GetSpacesUseCase>,
    get_spaces_by_filter: Arc<GetSpacesByFilterUseCase>,
    get_space_by_id: Arc<GetSpaceByIdUseCase>,
    get_nearby_spaces: Arc<GetNearbySpacesUseCase>,
    clock: SharedClock,
}

impl SpaceController {
    pub fn new(
        get_spaces: Arc<GetSpacesUseCase>,
        get_spaces_by_filter: Arc<GetSpacesByFilterUseCase>,
        get_space_by_id: Arc<GetSpaceByIdUseCase>,
        get_nearby_spaces: Arc<GetNearbySpacesUseCase>,
        clock: SharedClock,
    ) -> Self {
        Self {
            get_spaces,
            get_spaces_by_filter,
            get_space_by_id,
            get_nearby_spaces,
            clock,
        }
    }

    /// Current local time as `HH:MM`
    fn now(&self) -> String {
        self.clock.local().format("%H:%M").to_string()
    }

    /// Project already-loaded spaces
    pub fn present(&self, spaces: &[Space]) -> Vec<SpaceViewModel> {
        let now = self.now();
        spaces
            .iter()
            .map(|space| SpaceViewModel::from_space(space, &now))
            .collect()
    }

    pub async fn list(&self) -> Result<Vec<SpaceViewModel>, UseCaseError> {
        let spaces = self.get_spaces.execute().await?;
        Ok(self.present(&spaces))
    }

    pub async fn search(
        &self,
        filters: &SpaceFilters,
    ) -> Result<Vec<SpaceViewModel>, UseCaseError> {
        let spaces = self.get_spaces_by_filter.execute(filters).await?;
        Ok(self.present(&spaces))
    }

    pub async fn get(&self, id: &str) -> Result<SpaceViewModel, UseCaseError> {
        let space = self.get_space_by_id.execute(id).await?;
        Ok(SpaceViewModel::from_space(&space, &self.now()))
    }

    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<SpaceViewModel>, UseCaseError> {
        let spaces = self
            .get_nearby_spaces
            .execute(latitude, longitude, radius_km)
            .await?;
        Ok(self.present(&spaces))
    }
}

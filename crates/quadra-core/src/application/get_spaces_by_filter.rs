//! Filtered search with business re-ranking

use std::sync::Arc;

use tracing::{debug, warn};

use super::error::{UseCaseError, SEARCH_SPACES_FAILED};
use crate::domain::{Space, SpaceFilters};
use crate::repository::SpaceRepository;

/// Spaces rated at least this get [`RATING_BOOST`] when ranking by rating.
pub const BOOST_THRESHOLD: f64 = 4.5;
pub const RATING_BOOST: f64 = 0.5;

pub struct GetSpacesByFilterUseCase {
    repository: Arc<dyn SpaceRepository>,
}

impl GetSpacesByFilterUseCase {
    pub fn new(repository: Arc<dyn SpaceRepository>) -> Self {
        Self { repository }
    }

    /// Validate, fetch, then re-rank.
    ///
    /// A sport filter puts spaces offering that sport first. A rating filter
    /// then re-sorts everything by boosted rating, so when both are given the
    /// rating pass decides the final order.
    pub async fn execute(&self, filters: &SpaceFilters) -> Result<Vec<Space>, UseCaseError> {
        filters.validate()?;

        let mut spaces = self
            .repository
            .find_by_filters(filters)
            .await
            .map_err(|e| {
                warn!(error = %e, ?filters, "[GetSpacesByFilterUseCase] Search failed");
                UseCaseError::repository(SEARCH_SPACES_FAILED, e)
            })?;

        if let Some(sport) = &filters.sport {
            rank_by_sport(&mut spaces, sport);
        }
        if filters.rating.is_some() {
            rank_by_boosted_rating(&mut spaces);
        }

        debug!(count = spaces.len(), "[GetSpacesByFilterUseCase] Search complete");
        Ok(spaces)
    }
}

/// Spaces offering `sport` first; within each group, higher rating first.
/// Stable for equal keys.
pub fn rank_by_sport(spaces: &mut [Space], sport: &str) {
    spaces.sort_by(|a, b| {
        b.has_sport(sport)
            .cmp(&a.has_sport(sport))
            .then_with(|| b.rating().total_cmp(&a.rating()))
    });
}

pub fn boosted_rating(space: &Space) -> f64 {
    if space.rating() >= BOOST_THRESHOLD {
        space.rating() + RATING_BOOST
    } else {
        space.rating()
    }
}

/// Descending by rating plus boost. Stable for equal keys.
pub fn rank_by_boosted_rating(spaces: &mut [Space]) {
    spaces.sort_by(|a, b| boosted_rating(b).total_cmp(&boosted_rating(a)));
}

//! Full catalogue listing

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{UseCaseError, LOAD_SPACES_FAILED};
use crate::domain::Space;
use crate::repository::SpaceRepository;

/// Spaces rated below this are hidden under [`ListingPolicy::RatedFirst`].
pub const MIN_LISTED_RATING: f64 = 1.0;

/// Business rules applied to the full listing.
///
/// The shipped app returns repository order untouched. The rating rule exists
/// but stays off until product confirms it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingPolicy {
    /// Repository order, nothing hidden
    #[default]
    RepositoryOrder,
    /// Hide spaces rated below [`MIN_LISTED_RATING`], best rated first
    RatedFirst,
}

impl ListingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingPolicy::RepositoryOrder => "repository_order",
            ListingPolicy::RatedFirst => "rated_first",
        }
    }

    pub fn apply(&self, spaces: Vec<Space>) -> Vec<Space> {
        match self {
            ListingPolicy::RepositoryOrder => spaces,
            ListingPolicy::RatedFirst => {
                let mut listed: Vec<Space> = spaces
                    .into_iter()
                    .filter(|space| space.has_minimum_rating(MIN_LISTED_RATING))
                    .collect();
                listed.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
                listed
            }
        }
    }
}

impl fmt::Display for ListingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository_order" | "repository-order" => Ok(ListingPolicy::RepositoryOrder),
            "rated_first" | "rated-first" => Ok(ListingPolicy::RatedFirst),
            other => Err(format!("unknown listing policy: {}", other)),
        }
    }
}

pub struct GetSpacesUseCase {
    repository: Arc<dyn SpaceRepository>,
    policy: ListingPolicy,
}

impl GetSpacesUseCase {
    pub fn new(repository: Arc<dyn SpaceRepository>, policy: ListingPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> ListingPolicy {
        self.policy
    }

    pub async fn execute(&self) -> Result<Vec<Space>, UseCaseError> {
        let spaces = self.repository.find_all().await.map_err(|e| {
            warn!(error = %e, "[GetSpacesUseCase] Failed to load spaces");
            UseCaseError::repository(LOAD_SPACES_FAILED, e)
        })?;

        let listed = self.policy.apply(spaces);
        debug!(
            policy = %self.policy,
            count = listed.len(),
            "[GetSpacesUseCase] Listing spaces"
        );
        Ok(listed)
    }
}

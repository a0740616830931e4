//! Single space lookup

use std::sync::Arc;

use tracing::warn;

use super::error::{UseCaseError, LOAD_SPACE_FAILED};
use crate::domain::{Space, ValidationError};
use crate::repository::SpaceRepository;

pub struct GetSpaceByIdUseCase {
    repository: Arc<dyn SpaceRepository>,
}

impl GetSpaceByIdUseCase {
    pub fn new(repository: Arc<dyn SpaceRepository>) -> Self {
        Self { repository }
    }

    /// Fails with a validation error for a blank id, without touching storage.
    pub async fn execute(&self, id: &str) -> Result<Space, UseCaseError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }

        let space = self.repository.find_by_id(id).await.map_err(|e| {
            warn!(space_id = %id, error = %e, "[GetSpaceByIdUseCase] Lookup failed");
            UseCaseError::repository(LOAD_SPACE_FAILED, e)
        })?;

        space.ok_or_else(|| UseCaseError::NotFound { id: id.to_string() })
    }
}

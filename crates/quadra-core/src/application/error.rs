//! Use-case level errors
//!
//! This is the only place where technical repository failures are turned into
//! messages meant for people.

use crate::domain::ValidationError;
use crate::repository::RepositoryError;

pub const LOAD_SPACES_FAILED: &str = "Unable to load spaces right now. Please try again.";
pub const SEARCH_SPACES_FAILED: &str = "Unable to search spaces right now. Please try again.";
pub const LOAD_SPACE_FAILED: &str = "Unable to load this space right now. Please try again.";
pub const NEARBY_SPACES_FAILED: &str =
    "Unable to find spaces near you right now. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Space not found")]
    NotFound { id: String },

    #[error("{message}")]
    Repository {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl UseCaseError {
    pub fn repository(message: &'static str, source: RepositoryError) -> Self {
        Self::Repository { message, source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repository { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

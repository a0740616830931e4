//! Tests for GetSpaceByIdUseCase

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{GetSpaceByIdUseCase, UseCaseError, ValidationError};
use tests::fixtures::sample_catalog;
use tests::mocks::{FailingSpaceRepository, MockSpaceRepository};

#[tokio::test]
async fn finds_existing_space() {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    let use_case = GetSpaceByIdUseCase::new(repo);

    let space = use_case.execute("club").await.unwrap();

    assert_eq!(space.id(), "club");
    assert_eq!(space.sports(), ["tennis".to_string(), "padel".to_string()]);
}

#[tokio::test]
async fn surrounding_whitespace_is_ignored() {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    let use_case = GetSpaceByIdUseCase::new(repo);

    assert_eq!(use_case.execute("  beach \n").await.unwrap().id(), "beach");
}

#[tokio::test]
async fn empty_id_is_rejected_without_a_repository_call() {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    let use_case = GetSpaceByIdUseCase::new(repo.clone());

    for id in ["", "   ", "\t"] {
        assert_eq!(
            use_case.execute(id).await.unwrap_err(),
            UseCaseError::Validation(ValidationError::EmptyId)
        );
    }
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn missing_space_is_not_found() {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    let use_case = GetSpaceByIdUseCase::new(repo);

    let err = use_case.execute("nowhere").await.unwrap_err();

    assert_eq!(
        err,
        UseCaseError::NotFound {
            id: "nowhere".to_string()
        }
    );
    assert_eq!(err.to_string(), "Space not found");
}

#[tokio::test]
async fn store_failure_uses_load_message() {
    let use_case = GetSpaceByIdUseCase::new(Arc::new(FailingSpaceRepository::unavailable()));

    let err = use_case.execute("club").await.unwrap_err();

    assert_eq!(err.to_string(), quadra_core::application::LOAD_SPACE_FAILED);
}

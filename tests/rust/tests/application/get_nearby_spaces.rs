//! Tests for GetNearbySpacesUseCase

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{GetNearbySpacesUseCase, Space, UseCaseError, ValidationError};
use tests::fixtures::sample_catalog;
use tests::mocks::{FailingSpaceRepository, MockSpaceRepository};

// Praça da Sé, where the `club` fixture sits
const SE: (f64, f64) = (-23.5505, -46.6333);

fn ids(spaces: &[Space]) -> Vec<&str> {
    spaces.iter().map(Space::id).collect()
}

fn use_case() -> (GetNearbySpacesUseCase, Arc<MockSpaceRepository>) {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    (GetNearbySpacesUseCase::new(repo.clone()), repo)
}

#[tokio::test]
async fn keeps_spaces_inside_the_radius_in_store_order() {
    let (use_case, _) = use_case();

    let spaces = use_case.execute(SE.0, SE.1, 3.0).await.unwrap();

    assert_eq!(ids(&spaces), vec!["arena", "club", "dojo"]);
}

#[tokio::test]
async fn every_result_is_within_the_radius() {
    let (use_case, _) = use_case();

    for radius in [0.5, 3.0, 10.0, 500.0] {
        let spaces = use_case.execute(SE.0, SE.1, radius).await.unwrap();
        assert!(spaces
            .iter()
            .all(|s| s.distance_km_to(SE.0, SE.1) <= radius));
    }

    let city_wide = use_case.execute(SE.0, SE.1, 10.0).await.unwrap();
    assert!(!ids(&city_wide).contains(&"rio"));

    let state_wide = use_case.execute(SE.0, SE.1, 500.0).await.unwrap();
    assert_eq!(state_wide.len(), 5);
}

#[tokio::test]
async fn invalid_inputs_are_rejected_before_the_scan() {
    let (use_case, repo) = use_case();

    assert_eq!(
        use_case.execute(91.0, 0.0, 1.0).await.unwrap_err(),
        UseCaseError::Validation(ValidationError::InvalidLatitude(91.0))
    );
    assert_eq!(
        use_case.execute(0.0, -180.5, 1.0).await.unwrap_err(),
        UseCaseError::Validation(ValidationError::InvalidLongitude(-180.5))
    );
    assert_eq!(
        use_case.execute(0.0, 0.0, 0.0).await.unwrap_err(),
        UseCaseError::Validation(ValidationError::InvalidRadius(0.0))
    );
    assert!(use_case
        .execute(0.0, 0.0, f64::INFINITY)
        .await
        .unwrap_err()
        .is_validation());

    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn store_failure_uses_nearby_message() {
    let use_case = GetNearbySpacesUseCase::new(Arc::new(FailingSpaceRepository::unavailable()));

    let err = use_case.execute(SE.0, SE.1, 5.0).await.unwrap_err();

    assert_eq!(err.to_string(), quadra_core::application::NEARBY_SPACES_FAILED);
}

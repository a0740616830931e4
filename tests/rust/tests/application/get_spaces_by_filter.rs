//! Tests for GetSpacesByFilterUseCase

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{
    GetSpacesByFilterUseCase, RepositoryError, Space, SpaceFilters, UseCaseError, ValidationError,
};
use tests::fixtures::{rated_space, sample_catalog};
use tests::mocks::{FailingSpaceRepository, MockSpaceRepository};

fn ids(spaces: &[Space]) -> Vec<&str> {
    spaces.iter().map(Space::id).collect()
}

fn use_case(repo: MockSpaceRepository) -> GetSpacesByFilterUseCase {
    GetSpacesByFilterUseCase::new(Arc::new(repo))
}

#[tokio::test]
async fn sport_match_ranks_ahead_of_higher_rating() {
    let repo = MockSpaceRepository::new()
        .with_space(rated_space("b", &["padel"], 50.0, 5.0))
        .with_space(rated_space("a", &["beach tennis"], 50.0, 3.0))
        .unfiltered();

    let spaces = use_case(repo)
        .execute(&SpaceFilters::new().with_sport("beach tennis"))
        .await
        .unwrap();

    assert_eq!(ids(&spaces), vec!["a", "b"]);
}

#[tokio::test]
async fn sport_ties_are_broken_by_rating() {
    let repo = MockSpaceRepository::new()
        .with_space(rated_space("low", &["tennis"], 50.0, 3.0))
        .with_space(rated_space("other", &["judo"], 50.0, 4.9))
        .with_space(rated_space("high", &["tennis"], 50.0, 4.0))
        .unfiltered();

    let spaces = use_case(repo)
        .execute(&SpaceFilters::new().with_sport("tennis"))
        .await
        .unwrap();

    assert_eq!(ids(&spaces), vec!["high", "low", "other"]);
}

#[tokio::test]
async fn rating_pass_applies_boost_and_runs_last() {
    // 4.5 boosted to 5.0 beats an unboosted 4.4 even without the sport
    let repo = MockSpaceRepository::new()
        .with_space(rated_space("match", &["tennis"], 50.0, 4.4))
        .with_space(rated_space("boosted", &["padel"], 50.0, 4.5))
        .unfiltered();

    let spaces = use_case(repo)
        .execute(&SpaceFilters::new().with_sport("tennis").with_rating(4.0))
        .await
        .unwrap();

    assert_eq!(ids(&spaces), vec!["boosted", "match"]);
}

#[tokio::test]
async fn filters_are_applied_by_the_repository() {
    let repo = MockSpaceRepository::new().with_spaces(sample_catalog());

    let spaces = use_case(repo)
        .execute(
            &SpaceFilters::new()
                .with_sport("tennis")
                .with_min_price(50.0)
                .with_max_price(150.0),
        )
        .await
        .unwrap();

    assert_eq!(ids(&spaces), vec!["rio"]);
}

#[tokio::test]
async fn empty_filters_return_best_rated_first() {
    let repo = MockSpaceRepository::new().with_spaces(sample_catalog());

    let spaces = use_case(repo).execute(&SpaceFilters::new()).await.unwrap();

    assert_eq!(ids(&spaces), vec!["club", "beach", "arena", "rio", "dojo"]);
}

#[tokio::test]
async fn invalid_filters_never_reach_the_repository() {
    let repo = Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog()));
    let use_case = GetSpacesByFilterUseCase::new(repo.clone());

    let inverted = use_case
        .execute(&SpaceFilters::new().with_min_price(100.0).with_max_price(10.0))
        .await
        .unwrap_err();
    assert_eq!(
        inverted,
        UseCaseError::Validation(ValidationError::InvertedPriceRange {
            min: 100.0,
            max: 10.0
        })
    );

    let negative = use_case
        .execute(&SpaceFilters::new().with_min_price(-1.0))
        .await
        .unwrap_err();
    assert!(negative.is_validation());

    let rating = use_case
        .execute(&SpaceFilters::new().with_rating(6.0))
        .await
        .unwrap_err();
    assert_eq!(
        rating,
        UseCaseError::Validation(ValidationError::RatingOutOfRange(6.0))
    );

    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn store_failure_is_reported_with_source() {
    let repo = Arc::new(FailingSpaceRepository::new(
        RepositoryError::permission_denied("find_by_filters"),
    ));
    let use_case = GetSpacesByFilterUseCase::new(repo);

    let err = use_case.execute(&SpaceFilters::new()).await.unwrap_err();

    assert_eq!(err.to_string(), quadra_core::application::SEARCH_SPACES_FAILED);
    assert!(!err.is_retryable());
}

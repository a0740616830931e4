//! Tests for SpaceController

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{ApplicationServicesBuilder, SpaceController, SpaceFilters, UseCaseError};
use tests::clock::fixed_clock;
use tests::fixtures::sample_catalog;
use tests::mocks::{FailingSpaceRepository, MockSpaceRepository};

fn controller_at(hour: u32, minute: u32) -> Arc<SpaceController> {
    ApplicationServicesBuilder::new()
        .with_space_repo(Arc::new(MockSpaceRepository::new().with_spaces(sample_catalog())))
        .with_clock(fixed_clock(hour, minute))
        .build()
        .unwrap()
        .controller
}

#[tokio::test]
async fn list_projects_every_space() {
    let controller = controller_at(12, 0);

    let models = controller.list().await.unwrap();

    assert_eq!(models.len(), 5);
    let arena = &models[0];
    assert_eq!(arena.id, "arena");
    assert_eq!(arena.sports_text, "futsal, volleyball");
    assert_eq!(arena.formatted_price, "R$ 120.00/h");
    assert_eq!(arena.formatted_rating, "4.2");
    assert_eq!(arena.opening_hours_text, "08:00 - 22:00");
    assert_eq!(
        arena.primary_image.as_deref(),
        Some("https://img.example/arena.jpg")
    );
    assert!(arena.is_open_now);
}

#[tokio::test]
async fn open_now_follows_the_injected_clock() {
    let early = controller_at(7, 0).get("arena").await.unwrap();
    assert!(!early.is_open_now);

    let opening = controller_at(8, 0).get("arena").await.unwrap();
    assert!(opening.is_open_now);

    let closing = controller_at(22, 0).get("arena").await.unwrap();
    assert!(closing.is_open_now);

    let late = controller_at(22, 1).get("arena").await.unwrap();
    assert!(!late.is_open_now);

    // Default hours cover the whole day
    let club = controller_at(3, 30).get("club").await.unwrap();
    assert!(club.is_open_now);
}

#[tokio::test]
async fn search_and_nearby_map_use_case_results() {
    let controller = controller_at(12, 0);

    let tennis = controller
        .search(&SpaceFilters::new().with_sport("tennis"))
        .await
        .unwrap();
    let ids: Vec<&str> = tennis.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["club", "rio"]);

    let nearby = controller.nearby(-23.5505, -46.6333, 3.0).await.unwrap();
    let ids: Vec<&str> = nearby.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["arena", "club", "dojo"]);
}

#[tokio::test]
async fn view_model_serializes_in_camel_case() {
    let model = controller_at(12, 0).get("beach").await.unwrap();

    let json = serde_json::to_value(&model).unwrap();

    assert_eq!(json["formattedPrice"], "R$ 60.00/h");
    assert_eq!(json["isOpenNow"], true);
    assert_eq!(json["primaryImage"], serde_json::Value::Null);
    assert_eq!(json["coordinates"]["latitude"], -23.5874);
}

#[tokio::test]
async fn errors_pass_through_unchanged() {
    let controller = ApplicationServicesBuilder::new()
        .with_space_repo(Arc::new(FailingSpaceRepository::unavailable()))
        .with_clock(fixed_clock(12, 0))
        .build()
        .unwrap()
        .controller;

    let err = controller.list().await.unwrap_err();
    assert!(matches!(err, UseCaseError::Repository { .. }));

    let missing = controller_at(12, 0).get("").await.unwrap_err();
    assert!(missing.is_validation());
}

//! SqliteSpaceRepository integration tests

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{
    ApplicationServicesBuilder, RepositoryError, RepositoryErrorKind, SortField, SortOrder, Space,
    SpaceFilters, SpaceRepository,
};
use quadra_storage::{Database, SqliteSpaceRepository};
use tests::clock::fixed_clock;
use tests::db::TestDatabase;
use tests::fixtures::{sample_catalog, space_document, test_space};
use tokio::sync::Mutex;

fn ids(spaces: &[Space]) -> Vec<&str> {
    spaces.iter().map(Space::id).collect()
}

async fn seeded_repo(test_db: TestDatabase) -> SqliteSpaceRepository {
    let repo = SqliteSpaceRepository::new(Arc::new(Mutex::new(test_db.db)));
    for space in sample_catalog() {
        repo.create(&space).await.expect("Failed to seed space");
    }
    repo
}

#[tokio::test]
async fn test_catalog_round_trips_through_documents() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let stored = repo.find_all().await.unwrap();

    assert_eq!(stored, sample_catalog());
}

#[tokio::test]
async fn test_decoded_document_matches_source_record() {
    let repo = SqliteSpaceRepository::new(Arc::new(Mutex::new(TestDatabase::new().db)));
    let document = space_document("doc-1", "Quadra Paulista");

    let space = Space::from_data(document.clone()).unwrap();
    repo.create(&space).await.unwrap();

    let loaded = repo.find_by_id("doc-1").await.unwrap().unwrap();
    let data = loaded.to_data();
    for (key, value) in document.as_object().unwrap() {
        assert_eq!(&data[key], value, "field {}", key);
    }
    // Absent fields come back as their defaults
    assert_eq!(data["images"], serde_json::json!([]));
    assert_eq!(data["openingHours"]["open"], "00:00");
    assert_eq!(data["openingHours"]["close"], "23:59");
}

#[tokio::test]
async fn test_filters_match_use_case_expectations() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let tennis = repo
        .find_by_filters(&SpaceFilters::new().with_sport("tennis"))
        .await
        .unwrap();
    assert_eq!(ids(&tennis), vec!["club", "rio"]);

    let affordable = repo
        .find_by_filters(&SpaceFilters::new().with_max_price(90.0))
        .await
        .unwrap();
    assert_eq!(ids(&affordable), vec!["beach", "rio", "dojo"]);

    let top = repo
        .find_by_filters(&SpaceFilters::new().with_rating(4.5))
        .await
        .unwrap();
    assert_eq!(ids(&top), vec!["club", "beach"]);
}

#[tokio::test]
async fn test_sorted_and_by_sport() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let cheapest = repo
        .find_all_sorted(SortField::Price, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(ids(&cheapest), vec!["beach", "dojo", "rio", "arena", "club"]);

    let judo = repo.find_by_sport("judo").await.unwrap();
    assert_eq!(ids(&judo), vec!["dojo"]);
}

#[tokio::test]
async fn test_nearby_excludes_spaces_outside_radius() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let nearby = repo.find_nearby(-23.5505, -46.6333, 3.0).await.unwrap();

    assert_eq!(ids(&nearby), vec!["arena", "club", "dojo"]);
}

#[tokio::test]
async fn test_update_and_delete() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let renamed = test_space("club", "Clube Renovado")
        .with_sports(["squash"])
        .with_price(180.0)
        .with_rating(4.0);
    repo.update(&renamed).await.unwrap();
    assert_eq!(repo.find_by_id("club").await.unwrap(), Some(renamed));
    assert_eq!(ids(&repo.find_by_sport("squash").await.unwrap()), vec!["club"]);

    assert_eq!(
        repo.update(&test_space("ghost", "Ghost")).await,
        Err(RepositoryError::not_found("ghost"))
    );

    repo.delete("club").await.unwrap();
    repo.delete("club").await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_non_finite_values_are_rejected_as_malformed() {
    let repo = seeded_repo(TestDatabase::new()).await;

    let infinite = test_space("inf", "Infinite").with_price(f64::INFINITY);
    let err = repo.create(&infinite).await.unwrap_err();
    assert_eq!(err.kind(), RepositoryErrorKind::Malformed);
    assert!(!err.is_retryable());

    let unrated = test_space("nan", "Unrated").with_rating(f64::NAN);
    let err = repo.create(&unrated).await.unwrap_err();
    assert_eq!(err.kind(), RepositoryErrorKind::Malformed);

    let err = repo
        .update(&test_space("club", "Clube").with_rating(f64::NAN))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), RepositoryErrorKind::Malformed);
    let err = repo
        .update(&test_space("club", "Clube").with_price(f64::NEG_INFINITY))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), RepositoryErrorKind::Malformed);

    assert_eq!(repo.find_by_id("inf").await.unwrap(), None);
    assert_eq!(repo.find_by_id("nan").await.unwrap(), None);
    let club = repo.find_by_id("club").await.unwrap().unwrap();
    assert_eq!(club.price(), 200.0);
    assert_eq!(club.rating(), 4.9);

    let cheap = repo
        .find_by_filters(&SpaceFilters::new().with_max_price(10.0))
        .await
        .unwrap();
    assert!(cheap.is_empty());
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let test_db = TestDatabase::new();
    let path = test_db.db_path().to_path_buf();
    let (db, _dir) = test_db.into_shared();

    let repo = SqliteSpaceRepository::new(db.clone());
    repo.create(&test_space("kept", "Kept")).await.unwrap();
    drop(repo);
    drop(db);

    let reopened = SqliteSpaceRepository::new(Arc::new(Mutex::new(Database::open(&path).unwrap())));
    assert!(reopened.find_by_id("kept").await.unwrap().is_some());
}

#[tokio::test]
async fn test_full_graph_over_sqlite() {
    tests::init_test_tracing();
    let db = tests::db::shared_in_memory();
    let repo = Arc::new(SqliteSpaceRepository::new(db));
    for space in sample_catalog() {
        repo.create(&space).await.unwrap();
    }

    let services = ApplicationServicesBuilder::new()
        .with_space_repo(repo)
        .with_clock(fixed_clock(19, 0))
        .build()
        .unwrap();

    let results = services
        .controller
        .search(&SpaceFilters::new().with_sport("judo"))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_open_now);

    let missing = services.controller.get("nowhere").await.unwrap_err();
    assert_eq!(missing.to_string(), "Space not found");
}

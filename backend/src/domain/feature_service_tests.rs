//! Tests for the feature service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockFeatureRepository, FeatureRepositoryError};
use crate::domain::{Coordinates, ErrorCode, FeatureName, FeatureStatus, SearchRadius};

fn sample_create_request() -> CreateFeatureRequest {
    CreateFeatureRequest {
        name: FeatureName::new("Site A").expect("valid name"),
        coordinates: Coordinates::new(51.5, -0.12).expect("valid coordinates"),
    }
}

fn sample_record(id: FeatureId) -> FeatureRecord {
    FeatureRecord {
        id,
        name: "Site A".to_owned(),
        status: FeatureStatus::Done,
        attempts: 1,
        created_at: Utc::now(),
        updated_at: Some(Utc::now()),
        buffer_area_m2: Some(785_000.0),
    }
}

#[tokio::test]
async fn create_inserts_queued_feature_and_returns_id() {
    let mut repo = MockFeatureRepository::new();
    repo.expect_insert()
        .withf(|feature| feature.name.as_str() == "Site A")
        .times(1)
        .return_once(|_| Ok(()));

    let service = FeatureService::new(Arc::new(repo));
    let first = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    assert_ne!(first.as_uuid(), &uuid::Uuid::nil());
}

#[rstest]
#[case(FeatureRepositoryError::connection("pool unavailable"), ErrorCode::ServiceUnavailable)]
#[case(FeatureRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_maps_repository_errors(
    #[case] repo_error: FeatureRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockFeatureRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(move |_| Err(repo_error));

    let service = FeatureService::new(Arc::new(repo));
    let error = service
        .create(sample_create_request())
        .await
        .expect_err("repository failure surfaces");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case("123")]
#[tokio::test]
async fn process_rejects_malformed_ids_without_touching_repository(#[case] raw: &str) {
    let mut repo = MockFeatureRepository::new();
    repo.expect_buffer_if_queued().times(0);

    let service = FeatureService::new(Arc::new(repo));
    let processed = service
        .process(ProcessFeatureRequest {
            feature_id: raw.to_owned(),
            buffer_radius: None,
        })
        .await
        .expect("malformed id is not an error");

    assert!(!processed);
}

#[tokio::test]
async fn process_uses_configured_default_radius() {
    let id = FeatureId::random();
    let radius = BufferRadius::new(250.0).expect("valid radius");

    let mut repo = MockFeatureRepository::new();
    repo.expect_buffer_if_queued()
        .with(eq(id), eq(radius))
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = FeatureService::with_buffer_radius(Arc::new(repo), radius);
    let processed = service
        .process(ProcessFeatureRequest {
            feature_id: id.to_string(),
            buffer_radius: None,
        })
        .await
        .expect("process succeeds");

    assert!(processed);
}

#[tokio::test]
async fn process_prefers_request_radius_override() {
    let id = FeatureId::random();
    let override_radius = BufferRadius::new(75.0).expect("valid radius");

    let mut repo = MockFeatureRepository::new();
    repo.expect_buffer_if_queued()
        .with(eq(id), eq(override_radius))
        .times(1)
        .return_once(|_, _| Ok(false));

    let service = FeatureService::new(Arc::new(repo));
    let processed = service
        .process(ProcessFeatureRequest {
            feature_id: id.to_string(),
            buffer_radius: Some(override_radius),
        })
        .await
        .expect("process succeeds");

    assert!(!processed);
}

#[tokio::test]
async fn process_maps_connection_error_to_service_unavailable() {
    let mut repo = MockFeatureRepository::new();
    repo.expect_buffer_if_queued()
        .times(1)
        .return_once(|_, _| Err(FeatureRepositoryError::connection("refused")));

    let service = FeatureService::new(Arc::new(repo));
    let error = service
        .process(ProcessFeatureRequest {
            feature_id: FeatureId::random().to_string(),
            buffer_radius: None,
        })
        .await
        .expect_err("connection failure surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn get_returns_none_for_malformed_id() {
    let mut repo = MockFeatureRepository::new();
    repo.expect_find_by_id().times(0);

    let service = FeatureService::new(Arc::new(repo));
    let record = service.get("nope").await.expect("get succeeds");

    assert!(record.is_none());
}

#[tokio::test]
async fn get_returns_repository_record() {
    let id = FeatureId::random();
    let record = sample_record(id);
    let expected = record.clone();

    let mut repo = MockFeatureRepository::new();
    repo.expect_find_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(record)));

    let service = FeatureService::new(Arc::new(repo));
    let found = service
        .get(&id.to_string())
        .await
        .expect("get succeeds");

    assert_eq!(found, Some(expected));
}

#[tokio::test]
async fn near_passes_query_through() {
    let query = NearbyQuery {
        origin: Coordinates::new(51.5, -0.12).expect("valid coordinates"),
        radius: SearchRadius::new(2000).expect("valid radius"),
    };
    let nearby = NearbyFeature {
        feature: sample_record(FeatureId::random()),
        distance_m: 12.5,
    };
    let expected = vec![nearby.clone()];

    let mut repo = MockFeatureRepository::new();
    repo.expect_find_within()
        .with(eq(query))
        .times(1)
        .return_once(move |_| Ok(vec![nearby]));

    let service = FeatureService::new(Arc::new(repo));
    let results = service.near(query).await.expect("near succeeds");

    assert_eq!(results, expected);
}

#[tokio::test]
async fn near_maps_query_error_to_internal() {
    let mut repo = MockFeatureRepository::new();
    repo.expect_find_within()
        .times(1)
        .return_once(|_| Err(FeatureRepositoryError::query("timeout")));

    let service = FeatureService::new(Arc::new(repo));
    let error = service
        .near(NearbyQuery {
            origin: Coordinates::new(0.0, 0.0).expect("valid coordinates"),
            radius: SearchRadius::default(),
        })
        .await
        .expect_err("query failure surfaces");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

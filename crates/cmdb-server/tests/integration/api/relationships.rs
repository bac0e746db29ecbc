use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

use cmdb_models::models::relationships::Relationship;

use crate::fixtures::TestFixture;

#[tokio::test]
async fn test_create_relationship() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci("BillingApp-Prod");
    let db_ci = fixture.insert_test_ci("CustomerDB-Prod-01");
    let app = fixture.create_test_router();

    let payload = json!({
        "source_ci_id": app_ci.id,
        "target_ci_id": db_ci.id,
        "relationship_type": "Depends on"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/relationships")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Relationship = serde_json::from_slice(&body).unwrap();

    assert_eq!(created.source_ci_id, app_ci.id);
    assert_eq!(created.target_ci_id, db_ci.id);
    assert_eq!(created.relationship_type, "Depends on");
}

#[tokio::test]
async fn test_create_relationship_unknown_type() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci("BillingApp-Prod");
    let db_ci = fixture.insert_test_ci("CustomerDB-Prod-01");
    let app = fixture.create_test_router();

    let payload = json!({
        "source_ci_id": app_ci.id,
        "target_ci_id": db_ci.id,
        "relationship_type": "Vaguely associated with"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/relationships")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fixture.dal.relationships().count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_self_relationship_rejected() {
    let fixture = TestFixture::new();
    let ci = fixture.insert_test_ci("WebServer-Prod-01");
    let app = fixture.create_test_router();

    let payload = json!({
        "source_ci_id": ci.id,
        "target_ci_id": ci.id,
        "relationship_type": "Connected to"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/relationships")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_relationship_missing_endpoint() {
    let fixture = TestFixture::new();
    let ci = fixture.insert_test_ci("BillingApp-Prod");
    let app = fixture.create_test_router();

    let payload = json!({
        "source_ci_id": ci.id,
        "target_ci_id": 9999,
        "relationship_type": "Depends on"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/relationships")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fixture.dal.relationships().count().unwrap(), 0);
}

#[tokio::test]
async fn test_get_relationship() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci("BillingApp-Prod");
    let db_ci = fixture.insert_test_ci("CustomerDB-Prod-01");
    let created = fixture.insert_test_relationship(app_ci.id, db_ci.id, "Depends on");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/relationships/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let relationship: Relationship = serde_json::from_slice(&body).unwrap();
    assert_eq!(relationship, created);
}

#[tokio::test]
async fn test_get_relationship_not_found() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/relationships/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_relationship() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci("BillingApp-Prod");
    let db_ci = fixture.insert_test_ci("CustomerDB-Prod-01");
    let created = fixture.insert_test_relationship(app_ci.id, db_ci.id, "Depends on");
    let app = fixture.create_test_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/relationships/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(fixture.dal.relationships().count().unwrap(), 0);

    // A second delete reports the missing row.
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/relationships/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

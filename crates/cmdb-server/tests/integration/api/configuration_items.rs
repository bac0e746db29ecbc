use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

use cmdb_models::models::configuration_items::ConfigurationItem;

use crate::fixtures::TestFixture;

#[tokio::test]
async fn test_list_configuration_items() {
    let fixture = TestFixture::new();
    fixture.insert_test_ci("WebServer-Prod-01");
    fixture.insert_test_ci("CustomerDB-Prod-01");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/cis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let items: Vec<ConfigurationItem> = serde_json::from_slice(&body).unwrap();

    assert_eq!(items.len(), 2);
    assert!(items.iter().any(|i| i.ci_name == "WebServer-Prod-01"));
    assert!(items.iter().any(|i| i.ci_name == "CustomerDB-Prod-01"));
}

#[tokio::test]
async fn test_list_configuration_items_with_filters() {
    let fixture = TestFixture::new();
    fixture.insert_test_ci_with("WebServer-Prod-01", "Server", "Active");
    fixture.insert_test_ci_with("OldServer-01", "Server", "Retired");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/cis?status=Active&ci_type=Server")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let items: Vec<ConfigurationItem> = serde_json::from_slice(&body).unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].ci_name, "WebServer-Prod-01");
}

#[tokio::test]
async fn test_create_configuration_item() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let payload = json!({
        "ci_name": "WebServer-Prod-01",
        "ci_type": "Server",
        "status": "Active",
        "owner": "InfraTeam",
        "ip_location": "10.0.1.10"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cis")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: ConfigurationItem = serde_json::from_slice(&body).unwrap();

    assert_eq!(created.ci_name, "WebServer-Prod-01");
    assert_eq!(created.ci_type, "Server");
    assert_eq!(created.status, "Active");
    assert_eq!(created.owner, Some("InfraTeam".to_string()));
    assert_eq!(created.description, None);
}

#[tokio::test]
async fn test_create_configuration_item_empty_name() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let payload = json!({
        "ci_name": "",
        "ci_type": "Server",
        "status": "Active"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cis")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fixture.dal.configuration_items().count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_configuration_item_duplicate_name() {
    let fixture = TestFixture::new();
    fixture.insert_test_ci("WebServer-Prod-01");
    let app = fixture.create_test_router();

    let payload = json!({
        "ci_name": "WebServer-Prod-01",
        "ci_type": "Server",
        "status": "Active"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cis")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("duplicate name"));
}

#[tokio::test]
async fn test_get_configuration_item() {
    let fixture = TestFixture::new();
    let created = fixture.insert_test_ci("WebServer-Prod-01");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/cis/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let item: ConfigurationItem = serde_json::from_slice(&body).unwrap();
    assert_eq!(item, created);
}

#[tokio::test]
async fn test_get_configuration_item_not_found() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/cis/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_configuration_item_partial() {
    let fixture = TestFixture::new();
    let created = fixture.insert_test_ci("WebServer-Prod-01");
    let app = fixture.create_test_router();

    let payload = json!({ "status": "In Maintenance" });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/cis/{}", created.id))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let updated: ConfigurationItem = serde_json::from_slice(&body).unwrap();

    assert_eq!(updated.status, "In Maintenance");
    assert_eq!(updated.ci_name, created.ci_name);
    assert_eq!(updated.owner, created.owner);
}

#[tokio::test]
async fn test_update_configuration_item_empty_string_clears_optional() {
    let fixture = TestFixture::new();
    let created = fixture.insert_test_ci("WebServer-Prod-01");
    assert!(created.owner.is_some());
    let app = fixture.create_test_router();

    let payload = json!({ "owner": "" });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/cis/{}", created.id))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let updated: ConfigurationItem = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.owner, None);
}

#[tokio::test]
async fn test_update_configuration_item_not_found() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let payload = json!({ "status": "Retired" });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/cis/9999")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_configuration_item() {
    let fixture = TestFixture::new();
    let web = fixture.insert_test_ci("web-01");
    let db = fixture.insert_test_ci("db-01");
    fixture.insert_test_relationship(web.id, db.id, "Depends on");
    let app = fixture.create_test_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/cis/{}", db.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The item is gone and the relationship was cascaded.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/cis/{}", db.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fixture.dal.relationships().count().unwrap(), 0);
}

#[tokio::test]
async fn test_delete_configuration_item_not_found() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/cis/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_relationships_for_ci() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci_with("BillingApp-Prod", "Application", "Active");
    let db_ci = fixture.insert_test_ci_with("CustomerDB-Prod-01", "Database", "Active");
    let host_ci = fixture.insert_test_ci_with("AppServer-Prod-01", "Server", "Active");
    fixture.insert_test_relationship(app_ci.id, db_ci.id, "Depends on");
    fixture.insert_test_relationship(host_ci.id, app_ci.id, "Hosts");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/cis/{}/relationships", app_ci.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let outgoing = listing["outgoing"].as_array().unwrap();
    let incoming = listing["incoming"].as_array().unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0]["peer_name"], "CustomerDB-Prod-01");
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0]["peer_name"], "AppServer-Prod-01");
}

#[tokio::test]
async fn test_list_relationships_for_ci_single_direction() {
    let fixture = TestFixture::new();
    let app_ci = fixture.insert_test_ci("BillingApp-Prod");
    let db_ci = fixture.insert_test_ci("CustomerDB-Prod-01");
    fixture.insert_test_relationship(app_ci.id, db_ci.id, "Depends on");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/cis/{}/relationships?direction=outgoing",
                    app_ci.id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(listing["outgoing"].as_array().unwrap().len(), 1);
    // The incoming side is omitted when not requested.
    assert!(listing.get("incoming").is_none());
}

#[tokio::test]
async fn test_list_relationships_invalid_direction() {
    let fixture = TestFixture::new();
    let ci = fixture.insert_test_ci("WebServer-Prod-01");
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/cis/{}/relationships?direction=sideways",
                    ci.id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_relationships_for_missing_ci() {
    let fixture = TestFixture::new();
    let app = fixture.create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/cis/9999/relationships")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

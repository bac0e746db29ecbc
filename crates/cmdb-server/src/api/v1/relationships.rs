//! Relationship API endpoints.
//!
//! Relationships are immutable: create, fetch, and delete only.

use crate::api::v1::error_response;
use crate::dal::{DalError, DAL};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cmdb_models::models::relationships::{
    NewRelationship, Relationship, RelationshipView, RELATIONSHIP_TYPE_OPTIONS,
};
use cmdb_utils::logging::prelude::*;
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<DAL> {
    info!("Setting up relationship routes");
    Router::new()
        .route("/relationships", post(create_relationship))
        .route(
            "/relationships/:id",
            get(get_relationship).delete(delete_relationship),
        )
}

/// Request body for creating a relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRelationshipRequest {
    /// Identifier of the source configuration item
    pub source_ci_id: i32,
    /// Identifier of the target configuration item
    pub target_ci_id: i32,
    /// Type of the relationship; must be one of the curated types
    pub relationship_type: String,
}

/// Grouped single-hop relationship listing for one configuration item.
///
/// Only the requested directions are populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipListResponse {
    /// Relationships where the item is the source, joined with target display fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing: Option<Vec<RelationshipView>>,
    /// Relationships where the item is the target, joined with source display fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<Vec<RelationshipView>>,
}

async fn create_relationship(
    State(dal): State<DAL>,
    Json(request): Json<CreateRelationshipRequest>,
) -> Result<(StatusCode, Json<Relationship>), (StatusCode, Json<serde_json::Value>)> {
    info!(
        "Handling request to create relationship {} -[{}]-> {}",
        request.source_ci_id, request.relationship_type, request.target_ci_id
    );

    // The curated vocabulary is enforced on the API path only; the DAL
    // accepts any non-empty type.
    if !RELATIONSHIP_TYPE_OPTIONS.contains(&request.relationship_type.as_str()) {
        warn!(
            "Rejected relationship with unknown type: {}",
            request.relationship_type
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!(
                    "Invalid relationship_type. Allowed types are: {}",
                    RELATIONSHIP_TYPE_OPTIONS.join(", ")
                )
            })),
        ));
    }

    let new_relationship = NewRelationship::new(
        request.source_ci_id,
        request.target_ci_id,
        request.relationship_type,
    )
    .map_err(|msg| {
        warn!("Rejected relationship creation: {}", msg);
        error_response(&DalError::Validation(msg))
    })?;

    match dal.relationships().create(&new_relationship) {
        Ok(relationship) => {
            info!(
                "Successfully created relationship with ID: {}",
                relationship.id
            );
            Ok((StatusCode::CREATED, Json(relationship)))
        }
        Err(e) => {
            error!("Failed to create relationship: {}", e);
            Err(error_response(&e))
        }
    }
}

async fn get_relationship(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
) -> Result<Json<Relationship>, (StatusCode, Json<serde_json::Value>)> {
    debug!("Handling request to get relationship with ID: {}", id);
    let relationship = dal.relationships().get(id).map_err(|e| {
        error!("Failed to fetch relationship with ID {}: {}", id, e);
        error_response(&e)
    })?;

    match relationship {
        Some(relationship) => Ok(Json(relationship)),
        None => {
            warn!("Relationship not found with ID: {}", id);
            Err(error_response(&DalError::NotFound {
                entity: "relationship",
                id,
            }))
        }
    }
}

async fn delete_relationship(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    info!("Handling request to delete relationship with ID: {}", id);

    match dal.relationships().delete(id) {
        Ok(()) => {
            info!("Successfully deleted relationship with ID: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!("Failed to delete relationship with ID {}: {}", id, e);
            Err(error_response(&e))
        }
    }
}

//! Configuration item API endpoints.
//!
//! CRUD plus filtered listing, and the combined single-hop relationship
//! listing for one item.

use crate::api::v1::error_response;
use crate::api::v1::relationships::RelationshipListResponse;
use crate::dal::{CiFilter, DalError, DAL};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use cmdb_models::models::configuration_items::{
    ConfigurationItem, NewConfigurationItem, UpdateConfigurationItem,
};
use cmdb_utils::logging::prelude::*;
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<DAL> {
    info!("Setting up configuration item routes");
    Router::new()
        .route(
            "/cis",
            get(list_configuration_items).post(create_configuration_item),
        )
        .route(
            "/cis/:id",
            get(get_configuration_item)
                .put(update_configuration_item)
                .delete(delete_configuration_item),
        )
        .route("/cis/:id/relationships", get(list_relationships_for_ci))
}

/// Request body for creating a configuration item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConfigurationItemRequest {
    /// Unique name of the item
    pub ci_name: String,
    /// Type tag of the item
    pub ci_type: String,
    /// Lifecycle status of the item
    pub status: String,
    /// Optional owning team or person
    #[serde(default)]
    pub owner: Option<String>,
    /// Optional IP address or physical location
    #[serde(default)]
    pub ip_location: Option<String>,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for partially updating a configuration item.
///
/// Absent fields are left unchanged. For the optional columns an empty string
/// clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConfigurationItemRequest {
    #[serde(default)]
    pub ci_name: Option<String>,
    #[serde(default)]
    pub ci_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub ip_location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateConfigurationItemRequest {
    /// Converts the request into the DAL changeset. Empty strings on the
    /// nullable columns become "set to NULL".
    pub fn into_changeset(self) -> UpdateConfigurationItem {
        UpdateConfigurationItem {
            ci_name: self.ci_name,
            ci_type: self.ci_type,
            status: self.status,
            owner: optional_column(self.owner),
            ip_location: optional_column(self.ip_location),
            description: optional_column(self.description),
            last_updated: None,
        }
    }
}

fn optional_column(value: Option<String>) -> Option<Option<String>> {
    match value {
        None => None,
        Some(s) if s.trim().is_empty() => Some(None),
        Some(s) => Some(Some(s)),
    }
}

/// Query parameters for the per-item relationship listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionParams {
    /// "outgoing", "incoming", or "all" (default)
    pub direction: Option<String>,
}

async fn list_configuration_items(
    State(dal): State<DAL>,
    Query(filter): Query<CiFilter>,
) -> Result<Json<Vec<ConfigurationItem>>, (StatusCode, Json<serde_json::Value>)> {
    debug!("Handling request to list configuration items: {:?}", filter);
    match dal.configuration_items().list(&filter) {
        Ok(items) => {
            debug!("Successfully retrieved {} configuration items", items.len());
            Ok(Json(items))
        }
        Err(e) => {
            error!("Failed to list configuration items: {}", e);
            Err(error_response(&e))
        }
    }
}

async fn create_configuration_item(
    State(dal): State<DAL>,
    Json(request): Json<CreateConfigurationItemRequest>,
) -> Result<(StatusCode, Json<ConfigurationItem>), (StatusCode, Json<serde_json::Value>)> {
    info!(
        "Handling request to create configuration item \"{}\"",
        request.ci_name
    );

    let new_item = NewConfigurationItem::new(
        request.ci_name,
        request.ci_type,
        request.status,
        request.owner,
        request.ip_location,
        request.description,
    )
    .map_err(|msg| {
        warn!("Rejected configuration item creation: {}", msg);
        error_response(&DalError::Validation(msg))
    })?;

    match dal.configuration_items().create(&new_item) {
        Ok(item) => {
            info!("Successfully created configuration item with ID: {}", item.id);
            Ok((StatusCode::CREATED, Json(item)))
        }
        Err(e) => {
            error!("Failed to create configuration item: {}", e);
            Err(error_response(&e))
        }
    }
}

async fn get_configuration_item(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
) -> Result<Json<ConfigurationItem>, (StatusCode, Json<serde_json::Value>)> {
    debug!("Handling request to get configuration item with ID: {}", id);
    let item = dal.configuration_items().get(id).map_err(|e| {
        error!("Failed to fetch configuration item with ID {}: {}", id, e);
        error_response(&e)
    })?;

    match item {
        Some(item) => Ok(Json(item)),
        None => {
            warn!("Configuration item not found with ID: {}", id);
            Err(error_response(&DalError::NotFound {
                entity: "configuration item",
                id,
            }))
        }
    }
}

async fn update_configuration_item(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateConfigurationItemRequest>,
) -> Result<Json<ConfigurationItem>, (StatusCode, Json<serde_json::Value>)> {
    info!(
        "Handling request to update configuration item with ID: {}",
        id
    );

    let changes = request.into_changeset();
    match dal.configuration_items().update(id, &changes) {
        Ok(item) => {
            info!("Successfully updated configuration item with ID: {}", id);
            Ok(Json(item))
        }
        Err(e) => {
            error!("Failed to update configuration item with ID {}: {}", id, e);
            Err(error_response(&e))
        }
    }
}

async fn delete_configuration_item(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    info!(
        "Handling request to delete configuration item with ID: {}",
        id
    );

    match dal.configuration_items().delete(id) {
        Ok(()) => {
            info!(
                "Successfully deleted configuration item with ID: {} and its relationships",
                id
            );
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!("Failed to delete configuration item with ID {}: {}", id, e);
            Err(error_response(&e))
        }
    }
}

async fn list_relationships_for_ci(
    State(dal): State<DAL>,
    Path(id): Path<i32>,
    Query(params): Query<DirectionParams>,
) -> Result<Json<RelationshipListResponse>, (StatusCode, Json<serde_json::Value>)> {
    debug!(
        "Handling request to list relationships for configuration item {}",
        id
    );

    let item = dal.configuration_items().get(id).map_err(|e| {
        error!("Failed to fetch configuration item with ID {}: {}", id, e);
        error_response(&e)
    })?;
    if item.is_none() {
        warn!("Configuration item not found with ID: {}", id);
        return Err(error_response(&DalError::NotFound {
            entity: "configuration item",
            id,
        }));
    }

    let direction = params.direction.as_deref().unwrap_or("all");
    let mut response = RelationshipListResponse::default();

    match direction {
        "outgoing" => {
            response.outgoing = Some(dal.relationships().list_outgoing(id).map_err(|e| {
                error!("Failed to list outgoing relationships for {}: {}", id, e);
                error_response(&e)
            })?);
        }
        "incoming" => {
            response.incoming = Some(dal.relationships().list_incoming(id).map_err(|e| {
                error!("Failed to list incoming relationships for {}: {}", id, e);
                error_response(&e)
            })?);
        }
        "all" => {
            response.outgoing = Some(dal.relationships().list_outgoing(id).map_err(|e| {
                error!("Failed to list outgoing relationships for {}: {}", id, e);
                error_response(&e)
            })?);
            response.incoming = Some(dal.relationships().list_incoming(id).map_err(|e| {
                error!("Failed to list incoming relationships for {}: {}", id, e);
                error_response(&e)
            })?);
        }
        other => {
            warn!("Invalid direction parameter: {}", other);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Invalid direction parameter. Use 'outgoing', 'incoming', or 'all'."
                })),
            ));
        }
    }

    Ok(Json(response))
}

mod configuration_items;
mod relationships;

use crate::dal::{DalError, DAL};
use axum::http::StatusCode;
use axum::{Json, Router};

pub use configuration_items::{CreateConfigurationItemRequest, UpdateConfigurationItemRequest};
pub use relationships::{CreateRelationshipRequest, RelationshipListResponse};

pub fn routes() -> Router<DAL> {
    Router::new()
        .merge(configuration_items::routes())
        .merge(relationships::routes())
}

/// Translates a DAL error into the HTTP status and JSON body returned by the
/// API handlers.
pub(crate) fn error_response(err: &DalError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        DalError::Validation(_) => StatusCode::BAD_REQUEST,
        DalError::NotFound { .. } => StatusCode::NOT_FOUND,
        DalError::DuplicateName(_) => StatusCode::CONFLICT,
        DalError::Integrity(_) => StatusCode::CONFLICT,
        DalError::Database(_) | DalError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

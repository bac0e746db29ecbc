//! UI pages for relationships: the add-relationship form and edge deletion.

use crate::dal::{CiFilter, DalError};
use crate::web::{render, WebState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{
    extract::{Form, Path, State},
    routing::{get, post},
    Router,
};
use cmdb_models::models::relationships::{NewRelationship, RELATIONSHIP_TYPE_OPTIONS};
use cmdb_utils::logging::prelude::*;
use serde::Deserialize;
use tera::Context;

pub fn routes() -> Router<WebState> {
    Router::new()
        .route(
            "/ui/cis/:id/relationships/new",
            get(new_relationship_form),
        )
        .route("/ui/cis/:id/relationships", post(create_relationship))
        .route("/ui/relationships/:id/delete", post(delete_relationship))
}

/// HTML form fields for creating a relationship from a source CI.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipForm {
    pub target_ci_id: i32,
    pub relationship_type: String,
}

/// Hidden field carrying the CI page to return to after deleting an edge.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRelationshipForm {
    pub from_ci: i32,
}

async fn new_relationship_form(
    State(state): State<WebState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, String)> {
    let source = state.dal.configuration_items().get(id).map_err(|e| {
        error!("Failed to fetch configuration item {} for UI: {}", id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let source = match source {
        Some(source) => source,
        None => return Ok(Redirect::to("/ui/cis").into_response()),
    };

    // Candidate targets: every other item in the inventory.
    let targets: Vec<_> = state
        .dal
        .configuration_items()
        .list(&CiFilter::default())
        .map_err(|e| {
            error!("Failed to list configuration items for UI: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .into_iter()
        .filter(|ci| ci.id != id)
        .collect();

    let mut context = Context::new();
    context.insert("source", &source);
    context.insert("targets", &targets);
    context.insert("relationship_type_options", RELATIONSHIP_TYPE_OPTIONS);
    render(&state, "add_relationship.html", &context).map(IntoResponse::into_response)
}

async fn create_relationship(
    State(state): State<WebState>,
    Path(id): Path<i32>,
    Form(form): Form<RelationshipForm>,
) -> Redirect {
    let new_relationship =
        match NewRelationship::new(id, form.target_ci_id, form.relationship_type) {
            Ok(new_relationship) => new_relationship,
            Err(msg) => {
                warn!("Rejected relationship creation via UI: {}", msg);
                return Redirect::to(&format!("/ui/cis/{}/relationships/new", id));
            }
        };

    match state.dal.relationships().create(&new_relationship) {
        Ok(relationship) => {
            info!("Created relationship {} via UI", relationship.id);
        }
        Err(e) => {
            warn!("Failed to create relationship via UI: {}", e);
        }
    }
    Redirect::to(&format!("/ui/cis/{}", id))
}

async fn delete_relationship(
    State(state): State<WebState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteRelationshipForm>,
) -> Redirect {
    match state.dal.relationships().delete(id) {
        Ok(()) => info!("Deleted relationship {} via UI", id),
        Err(DalError::NotFound { .. }) => {
            warn!("Relationship {} not found for UI deletion", id)
        }
        Err(e) => warn!("Failed to delete relationship {} via UI: {}", id, e),
    }
    Redirect::to(&format!("/ui/cis/{}", form.from_ci))
}

//! UI pages for configuration items: list, detail, create, edit, delete.

use crate::dal::{CiFilter, DAL};
use crate::web::{render, WebState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{
    extract::{Form, Path, Query, State},
    routing::{get, post},
    Router,
};
use cmdb_models::models::configuration_items::{
    ConfigurationItem, NewConfigurationItem, UpdateConfigurationItem, CI_TYPE_OPTIONS,
    STATUS_OPTIONS,
};
use cmdb_utils::logging::prelude::*;
use serde::{Deserialize, Serialize};
use tera::Context;

pub fn routes() -> Router<WebState> {
    Router::new()
        .route("/ui/cis", get(list_cis).post(create_ci))
        .route("/ui/cis/new", get(new_ci_form))
        .route("/ui/cis/:id", get(view_ci).post(update_ci))
        .route("/ui/cis/:id/edit", get(edit_ci_form))
        .route("/ui/cis/:id/delete", post(delete_ci))
}

/// HTML form fields for creating or editing a configuration item. Browsers
/// submit empty strings for blank inputs; the handlers map those to NULL for
/// the optional columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CiForm {
    #[serde(default)]
    pub ci_name: String,
    #[serde(default)]
    pub ci_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub ip_location: String,
    #[serde(default)]
    pub description: String,
}

impl CiForm {
    fn from_item(item: &ConfigurationItem) -> Self {
        CiForm {
            ci_name: item.ci_name.clone(),
            ci_type: item.ci_type.clone(),
            status: item.status.clone(),
            owner: item.owner.clone().unwrap_or_default(),
            ip_location: item.ip_location.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
        }
    }
}

/// Filter fields echoed back into the list page's filter form.
#[derive(Debug, Clone, Default, Serialize)]
struct FilterDisplay {
    ci_name: String,
    ci_type: String,
    status: String,
    owner: String,
}

impl FilterDisplay {
    fn from_filter(filter: &CiFilter) -> Self {
        FilterDisplay {
            ci_name: filter.ci_name.clone().unwrap_or_default(),
            ci_type: filter.ci_type.clone().unwrap_or_default(),
            status: filter.status.clone().unwrap_or_default(),
            owner: filter.owner.clone().unwrap_or_default(),
        }
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn form_context(action: &str, editing: bool, form: &CiForm, error: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("action", action);
    context.insert("editing", &editing);
    context.insert("form", form);
    context.insert("ci_type_options", CI_TYPE_OPTIONS);
    context.insert("status_options", STATUS_OPTIONS);
    if let Some(error) = error {
        context.insert("error", error);
    }
    context
}

async fn list_cis(
    State(state): State<WebState>,
    Query(filter): Query<CiFilter>,
) -> Result<Response, (StatusCode, String)> {
    let cis = match state.dal.configuration_items().list(&filter) {
        Ok(cis) => cis,
        Err(e) => {
            error!("Failed to list configuration items for UI: {}", e);
            Vec::new()
        }
    };

    let mut context = Context::new();
    context.insert("cis", &cis);
    context.insert("filter", &FilterDisplay::from_filter(&filter));
    context.insert("ci_type_options", CI_TYPE_OPTIONS);
    context.insert("status_options", STATUS_OPTIONS);
    render(&state, "list_cis.html", &context).map(IntoResponse::into_response)
}

async fn new_ci_form(
    State(state): State<WebState>,
) -> Result<Response, (StatusCode, String)> {
    let context = form_context("/ui/cis", false, &CiForm::default(), None);
    render(&state, "add_edit_ci.html", &context).map(IntoResponse::into_response)
}

async fn create_ci(
    State(state): State<WebState>,
    Form(form): Form<CiForm>,
) -> Result<Response, (StatusCode, String)> {
    let new_item = NewConfigurationItem::new(
        form.ci_name.clone(),
        form.ci_type.clone(),
        form.status.clone(),
        none_if_empty(form.owner.clone()),
        none_if_empty(form.ip_location.clone()),
        none_if_empty(form.description.clone()),
    );

    let new_item = match new_item {
        Ok(new_item) => new_item,
        Err(msg) => {
            let context = form_context("/ui/cis", false, &form, Some(&msg));
            return render(&state, "add_edit_ci.html", &context)
                .map(IntoResponse::into_response);
        }
    };

    match state.dal.configuration_items().create(&new_item) {
        Ok(item) => {
            info!("Created configuration item {} via UI", item.id);
            Ok(Redirect::to(&format!("/ui/cis/{}", item.id)).into_response())
        }
        Err(e) => {
            warn!("Failed to create configuration item via UI: {}", e);
            let message = e.to_string();
            let context = form_context("/ui/cis", false, &form, Some(&message));
            render(&state, "add_edit_ci.html", &context).map(IntoResponse::into_response)
        }
    }
}

async fn view_ci(
    State(state): State<WebState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, String)> {
    let item = state.dal.configuration_items().get(id).map_err(|e| {
        error!("Failed to fetch configuration item {} for UI: {}", id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let item = match item {
        Some(item) => item,
        None => return Ok(Redirect::to("/ui/cis").into_response()),
    };

    let outgoing = state.dal.relationships().list_outgoing(id).map_err(|e| {
        error!("Failed to list outgoing relationships for UI: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let incoming = state.dal.relationships().list_incoming(id).map_err(|e| {
        error!("Failed to list incoming relationships for UI: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let mut context = Context::new();
    context.insert("ci", &item);
    context.insert("outgoing", &outgoing);
    context.insert("incoming", &incoming);
    render(&state, "view_ci.html", &context).map(IntoResponse::into_response)
}

async fn edit_ci_form(
    State(state): State<WebState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, String)> {
    let item = state.dal.configuration_items().get(id).map_err(|e| {
        error!("Failed to fetch configuration item {} for UI: {}", id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let item = match item {
        Some(item) => item,
        None => return Ok(Redirect::to("/ui/cis").into_response()),
    };

    let action = format!("/ui/cis/{}", id);
    let context = form_context(&action, true, &CiForm::from_item(&item), None);
    render(&state, "add_edit_ci.html", &context).map(IntoResponse::into_response)
}

async fn update_ci(
    State(state): State<WebState>,
    Path(id): Path<i32>,
    Form(form): Form<CiForm>,
) -> Result<Response, (StatusCode, String)> {
    // The edit form always submits every field, so this is a full rewrite;
    // blank optional fields clear the stored value.
    let changes = UpdateConfigurationItem {
        ci_name: Some(form.ci_name.clone()),
        ci_type: Some(form.ci_type.clone()),
        status: Some(form.status.clone()),
        owner: Some(none_if_empty(form.owner.clone())),
        ip_location: Some(none_if_empty(form.ip_location.clone())),
        description: Some(none_if_empty(form.description.clone())),
        last_updated: None,
    };

    match state.dal.configuration_items().update(id, &changes) {
        Ok(item) => {
            info!("Updated configuration item {} via UI", item.id);
            Ok(Redirect::to(&format!("/ui/cis/{}", item.id)).into_response())
        }
        Err(e) => {
            warn!("Failed to update configuration item {} via UI: {}", id, e);
            let message = e.to_string();
            let action = format!("/ui/cis/{}", id);
            let context = form_context(&action, true, &form, Some(&message));
            render(&state, "add_edit_ci.html", &context).map(IntoResponse::into_response)
        }
    }
}

async fn delete_ci(State(state): State<WebState>, Path(id): Path<i32>) -> Redirect {
    match state.dal.configuration_items().delete(id) {
        Ok(()) => info!("Deleted configuration item {} via UI", id),
        Err(e) => warn!("Failed to delete configuration item {} via UI: {}", id, e),
    }
    Redirect::to("/ui/cis")
}

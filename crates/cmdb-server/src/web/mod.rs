//! Server-rendered HTML UI.
//!
//! Templates are compiled into the binary and registered on a shared `Tera`
//! instance. Every page is rendered from data fetched through the DAL; form
//! errors re-render the submitted values with an error banner instead of
//! losing the input.

mod configuration_items;
mod relationships;

use crate::dal::DAL;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::{extract::State, routing::get, Router};
use cmdb_utils::logging::prelude::*;
use std::sync::Arc;
use tera::{Context, Tera};

/// Shared state for the UI handlers: the DAL plus the template registry.
#[derive(Clone)]
pub struct WebState {
    pub dal: DAL,
    pub tera: Arc<Tera>,
}

/// Builds the template registry from the embedded template sources.
pub fn build_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/base.html")),
        ("index.html", include_str!("../../templates/index.html")),
        ("list_cis.html", include_str!("../../templates/list_cis.html")),
        ("view_ci.html", include_str!("../../templates/view_ci.html")),
        (
            "add_edit_ci.html",
            include_str!("../../templates/add_edit_ci.html"),
        ),
        (
            "add_relationship.html",
            include_str!("../../templates/add_relationship.html"),
        ),
    ])?;
    Ok(tera)
}

/// Configures and returns the UI router.
pub fn routes(dal: DAL) -> tera::Result<Router> {
    info!("Setting up UI routes");
    let state = WebState {
        dal,
        tera: Arc::new(build_templates()?),
    };

    Ok(Router::new()
        .route("/", get(|| async { Redirect::to("/ui") }))
        .route("/ui", get(dashboard))
        .merge(configuration_items::routes())
        .merge(relationships::routes())
        .with_state(state))
}

/// Renders a template, translating render failures into a 500 response.
pub(crate) fn render(
    state: &WebState,
    template: &str,
    context: &Context,
) -> Result<Html<String>, (StatusCode, String)> {
    state.tera.render(template, context).map(Html).map_err(|e| {
        error!("Failed to render template {}: {}", template, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Template rendering failed".to_string(),
        )
    })
}

async fn dashboard(State(state): State<WebState>) -> Result<Html<String>, (StatusCode, String)> {
    let total_cis = state.dal.configuration_items().count().unwrap_or(0);
    let total_relationships = state.dal.relationships().count().unwrap_or(0);

    let mut context = Context::new();
    context.insert("total_cis", &total_cis);
    context.insert("total_relationships", &total_relationships);
    render(&state, "index.html", &context)
}

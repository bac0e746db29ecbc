//! # API Routes Aggregator Module
//!
//! This module aggregates all API routes and provides a function to configure
//! the main router. It serves as the central point for organizing and
//! initializing all API endpoints of the application.

pub mod v1;

use crate::dal::DAL;
use axum::{response::IntoResponse, routing::get, Router};
use hyper::StatusCode;

/// Configures and returns the main application router with all API routes
///
/// # Returns
///
/// Returns a configured `Router` instance that includes all API routes and
/// the liveness endpoints.
pub fn configure_api_routes() -> Router<DAL> {
    Router::new()
        .nest("/api/v1", v1::routes())
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

/// Health check endpoint handler
///
/// This handler responds to GET requests at the "/healthz" endpoint.
/// It's used to verify that the API is up and running.
async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready check endpoint handler
///
/// This handler responds to GET requests at the "/readyz" endpoint.
/// It's used to verify that the API is ready for use.
async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, "Ready")
}

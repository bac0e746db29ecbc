//! Utility functions for the CMDB server: shutdown handling and database
//! seeding.

use crate::dal::{DalError, DAL};
use cmdb_models::models::configuration_items::NewConfigurationItem;
use cmdb_models::models::relationships::NewRelationship;
use cmdb_utils::logging::prelude::*;
use tokio::sync::oneshot;

/// Handles the shutdown process for the server.
///
/// This function waits for a shutdown signal and then returns, letting axum
/// drain in-flight requests.
pub async fn shutdown(shutdown_rx: oneshot::Receiver<()>) {
    let _ = shutdown_rx.await;
    info!("Shutdown signal received");
}

/// Seeds the database with a small sample inventory.
///
/// Skips seeding when any configuration item already exists, so the command
/// is safe to run repeatedly.
///
/// # Returns
///
/// Returns `Ok(true)` if data was inserted, `Ok(false)` if the database was
/// already populated.
pub fn seed_database(dal: &DAL) -> Result<bool, DalError> {
    if dal.configuration_items().count()? > 0 {
        return Ok(false);
    }

    let items = [
        (
            "WebServer-Prod-01",
            "Server",
            Some("InfraTeam"),
            Some("10.0.1.10"),
            Some("Main production web server"),
        ),
        (
            "AppServer-Prod-01",
            "Server",
            Some("AppTeam"),
            Some("10.0.1.11"),
            Some("Main application server"),
        ),
        (
            "CustomerDB-Prod-01",
            "Database",
            Some("DBTeam"),
            Some("10.0.2.5"),
            Some("Primary customer database"),
        ),
        (
            "BillingApp-Prod",
            "Application",
            Some("FinanceAppTeam"),
            None,
            Some("Handles all customer billing"),
        ),
        (
            "MainWebsite-Prod",
            "Application",
            Some("WebTeam"),
            None,
            Some("Public facing website"),
        ),
        (
            "OfficeRouter-HQ",
            "Network Device",
            Some("NetOps"),
            Some("192.168.1.1"),
            Some("Main office router"),
        ),
        (
            "AuthService-Prod",
            "Application",
            Some("SecurityTeam"),
            None,
            Some("Authentication and Authorization service"),
        ),
    ];

    let mut ids = Vec::with_capacity(items.len());
    for (name, kind, owner, ip_location, description) in items {
        let new_item = NewConfigurationItem::new(
            name.to_string(),
            kind.to_string(),
            "Active".to_string(),
            owner.map(str::to_string),
            ip_location.map(str::to_string),
            description.map(str::to_string),
        )
        .map_err(DalError::Validation)?;
        let item = dal.configuration_items().create(&new_item)?;
        ids.push(item.id);
    }

    // Edges by seed position: BillingApp runs on AppServer and depends on
    // CustomerDB, MainWebsite runs on WebServer, AppServer depends on
    // AuthService, WebServer is connected to the office router, and
    // AuthService depends on CustomerDB for user data.
    let edges = [
        (3, 1, "Runs on"),
        (3, 2, "Depends on"),
        (4, 0, "Runs on"),
        (1, 6, "Depends on"),
        (0, 5, "Connected to"),
        (6, 2, "Depends on"),
    ];

    for (source, target, relationship_type) in edges {
        let new_relationship =
            NewRelationship::new(ids[source], ids[target], relationship_type.to_string())
                .map_err(DalError::Validation)?;
        dal.relationships().create(&new_relationship)?;
    }

    info!(
        "Seeded database with {} configuration items and {} relationships",
        items.len(),
        edges.len()
    );
    Ok(true)
}

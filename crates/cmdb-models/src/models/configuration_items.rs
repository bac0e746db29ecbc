//! # Configuration Items Module
//!
//! This module defines the data structures for Configuration Items (CIs), the
//! tracked entities of the inventory (servers, applications, databases, ...).
//!
//! ## Core Data Model
//!
//! The core data model is represented by the `ConfigurationItem` struct:
//!
//! - `id`: i32 - Unique identifier, generated by the database and never reused
//! - `ci_name`: String - Unique, human-readable name of the item
//! - `ci_type`: String - Type tag (e.g. "Server", "Application", "Database")
//! - `status`: String - Lifecycle status (e.g. "Active", "Retired")
//! - `owner`: Option<String> - Owning team or person
//! - `ip_location`: Option<String> - IP address or physical location
//! - `description`: Option<String> - Free-form description
//! - `last_updated`: NaiveDateTime - UTC timestamp of the last successful mutation
//!
//! The `NewConfigurationItem` struct is used for creating items and carries
//! validation in its constructor; `UpdateConfigurationItem` is a partial
//! changeset for edits.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Curated CI type tags offered by the UI. The data layer accepts any
/// non-empty string; this list is presentation vocabulary.
pub const CI_TYPE_OPTIONS: &[&str] = &[
    "Application",
    "Cloud Service",
    "Container",
    "Database",
    "Network Device",
    "Server",
    "Storage",
    "Virtual Machine",
];

/// Curated lifecycle statuses offered by the UI.
pub const STATUS_OPTIONS: &[&str] = &[
    "Active",
    "Decommissioned",
    "In Maintenance",
    "Provisioning",
    "Retired",
];

/// Represents a configuration item in the inventory.
///
/// This struct is used for querying existing items from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::configuration_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfigurationItem {
    /// Unique identifier for the item
    pub id: i32,
    /// Unique name of the item
    pub ci_name: String,
    /// Type tag of the item
    pub ci_type: String,
    /// Lifecycle status of the item
    pub status: String,
    /// Optional owning team or person
    pub owner: Option<String>,
    /// Optional IP address or physical location
    pub ip_location: Option<String>,
    /// Optional free-form description
    pub description: Option<String>,
    /// UTC timestamp of the last successful mutation
    pub last_updated: NaiveDateTime,
}

/// Represents a new configuration item to be inserted into the database.
#[derive(Insertable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::configuration_items)]
pub struct NewConfigurationItem {
    /// Unique name of the item
    pub ci_name: String,
    /// Type tag of the item
    pub ci_type: String,
    /// Lifecycle status of the item
    pub status: String,
    /// Optional owning team or person
    pub owner: Option<String>,
    /// Optional IP address or physical location
    pub ip_location: Option<String>,
    /// Optional free-form description
    pub description: Option<String>,
    /// UTC timestamp of the creation
    pub last_updated: NaiveDateTime,
}

impl NewConfigurationItem {
    /// Creates a new `NewConfigurationItem` instance with `last_updated` set
    /// to the current time.
    ///
    /// # Arguments
    ///
    /// * `ci_name` - Name of the item
    /// * `ci_type` - Type tag of the item
    /// * `status` - Lifecycle status of the item
    /// * `owner` - Optional owning team or person
    /// * `ip_location` - Optional IP address or physical location
    /// * `description` - Optional free-form description
    ///
    /// # Returns
    ///
    /// A `Result` containing a new `NewConfigurationItem` instance if
    /// successful, or an error message if validation fails.
    pub fn new(
        ci_name: String,
        ci_type: String,
        status: String,
        owner: Option<String>,
        ip_location: Option<String>,
        description: Option<String>,
    ) -> Result<Self, String> {
        if ci_name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if ci_type.trim().is_empty() {
            return Err("Type cannot be empty".to_string());
        }
        if status.trim().is_empty() {
            return Err("Status cannot be empty".to_string());
        }

        Ok(NewConfigurationItem {
            ci_name,
            ci_type,
            status,
            owner,
            ip_location,
            description,
            last_updated: Utc::now().naive_utc(),
        })
    }
}

/// Partial changeset for updating a configuration item.
///
/// `None` fields are left unchanged. The nullable columns use a double
/// `Option` so callers can distinguish "leave as is" (`None`) from "set to
/// NULL" (`Some(None)`). `last_updated` is always refreshed by the DAL.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::configuration_items)]
pub struct UpdateConfigurationItem {
    /// New name, if changing
    pub ci_name: Option<String>,
    /// New type tag, if changing
    pub ci_type: Option<String>,
    /// New lifecycle status, if changing
    pub status: Option<String>,
    /// New owner; `Some(None)` clears the field
    pub owner: Option<Option<String>>,
    /// New IP/location; `Some(None)` clears the field
    pub ip_location: Option<Option<String>>,
    /// New description; `Some(None)` clears the field
    pub description: Option<Option<String>>,
    /// Refreshed mutation timestamp, set by the DAL
    pub last_updated: Option<NaiveDateTime>,
}

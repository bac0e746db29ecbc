//! Data Access Layer for Configuration Item operations.
//!
//! This module provides functionality to interact with the database for
//! CI-related operations: creating, retrieving, filtering, updating, and
//! deleting items. Deleting an item cascades to every relationship that
//! references it, inside a single transaction.

use crate::dal::{DalError, DAL};
use chrono::Utc;
use cmdb_models::models::configuration_items::{
    ConfigurationItem, NewConfigurationItem, UpdateConfigurationItem,
};
use cmdb_models::schema::{configuration_items, relationships};
use diesel::prelude::*;
use serde::Deserialize;

/// Optional, conjunctive filters for listing configuration items.
///
/// All fields are independently optional; an empty filter returns every item.
/// Name and owner are case-insensitive substring matches, type and status are
/// exact matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CiFilter {
    /// Substring match on the item name
    pub ci_name: Option<String>,
    /// Exact match on the type tag
    pub ci_type: Option<String>,
    /// Exact match on the lifecycle status
    pub status: Option<String>,
    /// Substring match on the owner
    pub owner: Option<String>,
}

/// Data Access Layer for Configuration Item operations.
pub struct ConfigurationItemsDAL<'a> {
    /// Reference to the main DAL instance.
    pub dal: &'a DAL,
}

impl ConfigurationItemsDAL<'_> {
    /// Creates a new configuration item in the database.
    ///
    /// # Arguments
    ///
    /// * `new_item` - A reference to the NewConfigurationItem struct containing the item details.
    ///
    /// # Returns
    ///
    /// Returns a Result containing the created ConfigurationItem on success,
    /// or a DalError on failure. Fails with `DuplicateName` if an item with
    /// the same name already exists.
    pub fn create(&self, new_item: &NewConfigurationItem) -> Result<ConfigurationItem, DalError> {
        let conn = &mut self.dal.pool.get()?;

        let existing: Option<ConfigurationItem> = configuration_items::table
            .filter(configuration_items::ci_name.eq(&new_item.ci_name))
            .first(conn)
            .optional()?;
        if existing.is_some() {
            return Err(DalError::DuplicateName(new_item.ci_name.clone()));
        }

        diesel::insert_into(configuration_items::table)
            .values(new_item)
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Retrieves a configuration item by its id.
    ///
    /// # Returns
    ///
    /// Returns a Result containing an Option<ConfigurationItem> if found, or a DalError on failure.
    pub fn get(&self, item_id: i32) -> Result<Option<ConfigurationItem>, DalError> {
        let conn = &mut self.dal.pool.get()?;
        configuration_items::table
            .filter(configuration_items::id.eq(item_id))
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Lists configuration items matching all supplied filters, ordered by id
    /// ascending for stable output.
    ///
    /// # Arguments
    ///
    /// * `filter` - The optional filters to apply. An empty filter lists everything.
    pub fn list(&self, filter: &CiFilter) -> Result<Vec<ConfigurationItem>, DalError> {
        let conn = &mut self.dal.pool.get()?;

        let mut query = configuration_items::table.into_boxed();

        // SQLite LIKE is case-insensitive for ASCII.
        if let Some(ref name) = filter.ci_name {
            if !name.is_empty() {
                query = query.filter(configuration_items::ci_name.like(format!("%{}%", name)));
            }
        }
        if let Some(ref ci_type) = filter.ci_type {
            if !ci_type.is_empty() {
                query = query.filter(configuration_items::ci_type.eq(ci_type.clone()));
            }
        }
        if let Some(ref status) = filter.status {
            if !status.is_empty() {
                query = query.filter(configuration_items::status.eq(status.clone()));
            }
        }
        if let Some(ref owner) = filter.owner {
            if !owner.is_empty() {
                query = query.filter(configuration_items::owner.like(format!("%{}%", owner)));
            }
        }

        query
            .order(configuration_items::id.asc())
            .load(conn)
            .map_err(Into::into)
    }

    /// Applies a partial update to a configuration item and refreshes its
    /// `last_updated` timestamp.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The id of the item to update.
    /// * `changes` - The fields to change; `None` fields are left unchanged.
    ///
    /// # Returns
    ///
    /// Returns the updated ConfigurationItem, `NotFound` if the id does not
    /// exist, or `DuplicateName` when renaming onto an existing name.
    pub fn update(
        &self,
        item_id: i32,
        changes: &UpdateConfigurationItem,
    ) -> Result<ConfigurationItem, DalError> {
        if let Some(ref name) = changes.ci_name {
            if name.trim().is_empty() {
                return Err(DalError::Validation("Name cannot be empty".to_string()));
            }
        }
        if let Some(ref ci_type) = changes.ci_type {
            if ci_type.trim().is_empty() {
                return Err(DalError::Validation("Type cannot be empty".to_string()));
            }
        }
        if let Some(ref status) = changes.status {
            if status.trim().is_empty() {
                return Err(DalError::Validation("Status cannot be empty".to_string()));
            }
        }

        let conn = &mut self.dal.pool.get()?;

        conn.transaction(|conn| {
            let existing: Option<ConfigurationItem> = configuration_items::table
                .filter(configuration_items::id.eq(item_id))
                .first(conn)
                .optional()?;
            let existing = existing.ok_or(DalError::NotFound {
                entity: "configuration item",
                id: item_id,
            })?;

            if let Some(ref new_name) = changes.ci_name {
                if *new_name != existing.ci_name {
                    let clash: Option<ConfigurationItem> = configuration_items::table
                        .filter(configuration_items::ci_name.eq(new_name))
                        .filter(configuration_items::id.ne(item_id))
                        .first(conn)
                        .optional()?;
                    if clash.is_some() {
                        return Err(DalError::DuplicateName(new_name.clone()));
                    }
                }
            }

            let stamped = UpdateConfigurationItem {
                last_updated: Some(Utc::now().naive_utc()),
                ..changes.clone()
            };

            diesel::update(configuration_items::table.filter(configuration_items::id.eq(item_id)))
                .set(&stamped)
                .get_result(conn)
                .map_err(Into::into)
        })
    }

    /// Deletes a configuration item and, atomically, every relationship that
    /// references it as source or target.
    ///
    /// The whole operation runs in one transaction: either the item and all
    /// its relationships are gone, or nothing changed.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success or `NotFound` if the id does not exist.
    pub fn delete(&self, item_id: i32) -> Result<(), DalError> {
        let conn = &mut self.dal.pool.get()?;

        conn.transaction(|conn| {
            diesel::delete(
                relationships::table.filter(
                    relationships::source_ci_id
                        .eq(item_id)
                        .or(relationships::target_ci_id.eq(item_id)),
                ),
            )
            .execute(conn)?;

            let deleted = diesel::delete(
                configuration_items::table.filter(configuration_items::id.eq(item_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                // Rolls back the relationship deletes above.
                return Err(DalError::NotFound {
                    entity: "configuration item",
                    id: item_id,
                });
            }

            Ok(())
        })
    }

    /// Counts all configuration items.
    pub fn count(&self) -> Result<i64, DalError> {
        let conn = &mut self.dal.pool.get()?;
        configuration_items::table
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}

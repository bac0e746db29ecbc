//! # Relationships Module
//!
//! This module defines the data structures for relationships: directed, typed
//! edges between two configuration items, read as
//! "source `relationship_type` target" (e.g. "BillingApp Depends on CustomerDB").
//!
//! Relationships are immutable once created; they are only ever created and
//! deleted. Deleting a configuration item cascades to every relationship
//! where it appears as source or target.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Curated relationship types offered by the UI and validated on the API
/// create path.
pub const RELATIONSHIP_TYPE_OPTIONS: &[&str] = &[
    "Connected to",
    "Depends on",
    "Hosts",
    "Provides",
    "Runs on",
];

/// Represents a directed relationship between two configuration items.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::relationships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Relationship {
    /// Unique identifier for the relationship
    pub id: i32,
    /// Identifier of the source configuration item
    pub source_ci_id: i32,
    /// Identifier of the target configuration item
    pub target_ci_id: i32,
    /// Type of the relationship (e.g. "Depends on", "Hosts")
    pub relationship_type: String,
}

/// Represents a new relationship to be inserted into the database.
#[derive(Insertable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::relationships)]
pub struct NewRelationship {
    /// Identifier of the source configuration item
    pub source_ci_id: i32,
    /// Identifier of the target configuration item
    pub target_ci_id: i32,
    /// Type of the relationship
    pub relationship_type: String,
}

impl NewRelationship {
    /// Creates a new `NewRelationship` instance.
    ///
    /// # Arguments
    ///
    /// * `source_ci_id` - Identifier of the source configuration item
    /// * `target_ci_id` - Identifier of the target configuration item
    /// * `relationship_type` - Type of the relationship
    ///
    /// # Returns
    ///
    /// A `Result` containing a new `NewRelationship` instance if successful,
    /// or an error message if validation fails. Self-relationships are
    /// rejected here and by a table CHECK constraint.
    pub fn new(
        source_ci_id: i32,
        target_ci_id: i32,
        relationship_type: String,
    ) -> Result<Self, String> {
        if relationship_type.trim().is_empty() {
            return Err("Relationship type cannot be empty".to_string());
        }
        if source_ci_id == target_ci_id {
            return Err("Source and target cannot be the same item".to_string());
        }

        Ok(NewRelationship {
            source_ci_id,
            target_ci_id,
            relationship_type,
        })
    }
}

/// A relationship joined with the display fields of the configuration item at
/// the far end of the edge, for presentation.
///
/// For an outgoing listing the peer is the target item; for an incoming
/// listing the peer is the source item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipView {
    /// Unique identifier for the relationship
    pub id: i32,
    /// Identifier of the source configuration item
    pub source_ci_id: i32,
    /// Identifier of the target configuration item
    pub target_ci_id: i32,
    /// Type of the relationship
    pub relationship_type: String,
    /// Name of the peer configuration item
    pub peer_name: String,
    /// Type tag of the peer configuration item
    pub peer_type: String,
}

impl RelationshipView {
    /// Builds a view from a relationship row joined with the peer's display
    /// columns.
    pub fn from_joined(relationship: Relationship, peer_name: String, peer_type: String) -> Self {
        RelationshipView {
            id: relationship.id,
            source_ci_id: relationship.source_ci_id,
            target_ci_id: relationship.target_ci_id,
            relationship_type: relationship.relationship_type,
            peer_name,
            peer_type,
        }
    }
}

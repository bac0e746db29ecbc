//! Data Access Layer for Relationship operations.
//!
//! Relationships are directed, typed edges between two configuration items.
//! Creation verifies both endpoints exist inside a transaction; listings are
//! single-hop lookups joined with the peer item's display fields.

use crate::dal::{DalError, DAL};
use cmdb_models::models::relationships::{NewRelationship, Relationship, RelationshipView};
use cmdb_models::schema::{configuration_items, relationships};
use diesel::prelude::*;

/// Data Access Layer for Relationship operations.
pub struct RelationshipsDAL<'a> {
    /// Reference to the main DAL instance.
    pub dal: &'a DAL,
}

impl RelationshipsDAL<'_> {
    /// Creates a new relationship in the database.
    ///
    /// Both endpoints are checked for existence inside the same transaction
    /// as the insert, so a concurrently deleted endpoint cannot leave a
    /// dangling edge.
    ///
    /// # Returns
    ///
    /// Returns the created Relationship, or `NotFound` naming whichever
    /// endpoint is missing.
    pub fn create(&self, new_relationship: &NewRelationship) -> Result<Relationship, DalError> {
        let conn = &mut self.dal.pool.get()?;

        conn.transaction(|conn| {
            let source_count: i64 = configuration_items::table
                .filter(configuration_items::id.eq(new_relationship.source_ci_id))
                .count()
                .get_result(conn)?;
            if source_count == 0 {
                return Err(DalError::NotFound {
                    entity: "source configuration item",
                    id: new_relationship.source_ci_id,
                });
            }

            let target_count: i64 = configuration_items::table
                .filter(configuration_items::id.eq(new_relationship.target_ci_id))
                .count()
                .get_result(conn)?;
            if target_count == 0 {
                return Err(DalError::NotFound {
                    entity: "target configuration item",
                    id: new_relationship.target_ci_id,
                });
            }

            diesel::insert_into(relationships::table)
                .values(new_relationship)
                .get_result(conn)
                .map_err(Into::into)
        })
    }

    /// Retrieves a relationship by its id.
    pub fn get(&self, relationship_id: i32) -> Result<Option<Relationship>, DalError> {
        let conn = &mut self.dal.pool.get()?;
        relationships::table
            .filter(relationships::id.eq(relationship_id))
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Lists the outgoing relationships of a configuration item, each joined
    /// with the target item's name and type, ordered by relationship id.
    pub fn list_outgoing(&self, ci_id: i32) -> Result<Vec<RelationshipView>, DalError> {
        let conn = &mut self.dal.pool.get()?;

        let rows: Vec<(Relationship, String, String)> = relationships::table
            .inner_join(
                configuration_items::table
                    .on(configuration_items::id.eq(relationships::target_ci_id)),
            )
            .filter(relationships::source_ci_id.eq(ci_id))
            .order(relationships::id.asc())
            .select((
                Relationship::as_select(),
                configuration_items::ci_name,
                configuration_items::ci_type,
            ))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|(rel, name, kind)| RelationshipView::from_joined(rel, name, kind))
            .collect())
    }

    /// Lists the incoming relationships of a configuration item, each joined
    /// with the source item's name and type, ordered by relationship id.
    pub fn list_incoming(&self, ci_id: i32) -> Result<Vec<RelationshipView>, DalError> {
        let conn = &mut self.dal.pool.get()?;

        let rows: Vec<(Relationship, String, String)> = relationships::table
            .inner_join(
                configuration_items::table
                    .on(configuration_items::id.eq(relationships::source_ci_id)),
            )
            .filter(relationships::target_ci_id.eq(ci_id))
            .order(relationships::id.asc())
            .select((
                Relationship::as_select(),
                configuration_items::ci_name,
                configuration_items::ci_type,
            ))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|(rel, name, kind)| RelationshipView::from_joined(rel, name, kind))
            .collect())
    }

    /// Deletes a relationship by its id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success or `NotFound` if the id does not exist.
    pub fn delete(&self, relationship_id: i32) -> Result<(), DalError> {
        let conn = &mut self.dal.pool.get()?;

        let deleted =
            diesel::delete(relationships::table.filter(relationships::id.eq(relationship_id)))
                .execute(conn)?;

        if deleted == 0 {
            return Err(DalError::NotFound {
                entity: "relationship",
                id: relationship_id,
            });
        }

        Ok(())
    }

    /// Counts all relationships.
    pub fn count(&self) -> Result<i64, DalError> {
        let conn = &mut self.dal.pool.get()?;
        relationships::table
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}

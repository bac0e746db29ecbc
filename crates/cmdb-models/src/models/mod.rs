//! Data models for our application to interact with
pub mod configuration_items;
pub mod relationships;

pub use configuration_items::{
    ConfigurationItem, NewConfigurationItem, UpdateConfigurationItem, CI_TYPE_OPTIONS,
    STATUS_OPTIONS,
};
pub use relationships::{NewRelationship, Relationship, RelationshipView, RELATIONSHIP_TYPE_OPTIONS};

//! Typed errors returned by the Data Access Layer.
//!
//! Every DAL operation returns `Result<_, DalError>`; nothing is swallowed.
//! The API and UI layers translate these into HTTP statuses and user-visible
//! messages respectively.

use thiserror::Error;

/// Error type for all DAL operations.
#[derive(Debug, Error)]
pub enum DalError {
    /// A required field is missing or empty, or the input violates a business
    /// rule (e.g. a self-relationship).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced id does not exist.
    #[error("{entity} with ID {id} not found")]
    NotFound {
        /// Human-readable entity name ("configuration item", "relationship", ...)
        entity: &'static str,
        /// The id that was looked up
        id: i32,
    },

    /// A configuration item with the given name already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A storage-layer constraint failed (foreign key or check violation
    /// surfacing mid-transaction).
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(diesel::result::Error),

    /// Failed to get a connection from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl From<diesel::result::Error> for DalError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DalError::DuplicateName(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                DalError::Integrity(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                DalError::Integrity(info.message().to_string())
            }
            other => DalError::Database(other),
        }
    }
}

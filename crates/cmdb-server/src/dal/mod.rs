use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

mod configuration_items;
mod error;
mod relationships;

pub use configuration_items::{CiFilter, ConfigurationItemsDAL};
pub use error::DalError;
pub use relationships::RelationshipsDAL;

/// The Data Access Layer. Holds the connection pool; per-entity DALs borrow
/// it through the accessor methods.
#[derive(Clone)]
pub struct DAL {
    pub pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl DAL {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        DAL { pool }
    }

    pub fn configuration_items(&self) -> ConfigurationItemsDAL {
        ConfigurationItemsDAL { dal: self }
    }

    pub fn relationships(&self) -> RelationshipsDAL {
        RelationshipsDAL { dal: self }
    }
}

//! Database connection pool management using diesel and r2d2.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Represents a pool of SQLite database connections.
#[derive(Clone)]
pub struct ConnectionPool {
    /// The actual connection pool.
    pub pool: Pool<ConnectionManager<SqliteConnection>>,
}

/// Enables foreign key enforcement and a busy timeout on every pooled
/// connection. SQLite ships with foreign keys off per connection.
#[derive(Debug)]
struct SqliteConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates a shared connection pool for the SQLite database.
///
/// # Arguments
///
/// * `database_url` - Path of the SQLite database file
/// * `max_size` - The maximum number of connections the pool should maintain
///
/// # Returns
///
/// Returns a `ConnectionPool` instance containing the created connection pool.
///
/// # Panics
///
/// This function will panic if the connection pool creation fails.
pub fn create_shared_connection_pool(database_url: &str, max_size: u32) -> ConnectionPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqliteConnectionCustomizer))
        .build(manager)
        .expect("Failed to create connection pool");

    ConnectionPool { pool }
}

impl ConnectionPool {
    /// Gets a connection from the pool.
    pub fn get(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, r2d2::Error> {
        self.pool.get()
    }
}

//! CMDB server CLI application
//!
//! This module provides the command-line interface for the CMDB server.
//! It includes functionality for serving the application, resetting the
//! database schema, and seeding sample data.

use clap::{Parser, Subcommand};
use cmdb_server::dal::DAL;
use cmdb_server::db::create_shared_connection_pool;
use cmdb_server::{api, utils, web};
use cmdb_utils::config::Settings;
use cmdb_utils::logging::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenv::dotenv;
use tokio::signal;

/// Embedded migrations for the database
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../cmdb-models/migrations");

/// Command-line interface structure
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional path to a configuration file
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
enum Commands {
    /// Start the CMDB server
    Serve,
    /// Drop and recreate the database schema
    InitDb,
    /// Seed the database with a sample inventory
    SeedDb,
}

/// Main function to run the CMDB server application
///
/// This function initializes the application, parses command-line arguments,
/// and executes the appropriate command based on user input.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = Settings::new(cli.config.clone()).expect("Failed to load configuration");

    // Initialize logger
    cmdb_utils::logging::init_with_format(&config.log.level, &config.log.format)
        .expect("Failed to initialize logger");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => serve(&config).await?,
        Commands::InitDb => init_db(&config)?,
        Commands::SeedDb => seed_db(&config)?,
    }
    Ok(())
}

/// Function to start the CMDB server
///
/// This function initializes the database, runs migrations, configures the
/// API and UI routes, and starts the server with graceful shutdown support.
async fn serve(config: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting CMDB server");

    // Create database connection pool
    info!("Creating database connection pool");
    let connection_pool = create_shared_connection_pool(&config.database.url, 5);
    info!("Database connection pool created successfully");

    // Run pending migrations
    info!("Running pending database migrations");
    let mut conn = connection_pool
        .pool
        .get()
        .expect("Failed to get DB connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    info!("Database migrations completed successfully");
    drop(conn);

    // Initialize Data Access Layer
    info!("Initializing Data Access Layer");
    let dal = DAL::new(connection_pool.pool.clone());

    // Configure API and UI routes
    info!("Configuring routes");
    let app = api::configure_api_routes()
        .with_state(dal.clone())
        .merge(web::routes(dal)?);

    // Set up the server address
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Set up shutdown signal handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
        shutdown_tx.send(()).ok();
    });

    // Start the server with graceful shutdown
    info!("CMDB server is now running");
    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown(shutdown_rx))
        .await?;

    Ok(())
}

/// Function to drop and recreate the database schema
fn init_db(config: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    info!("Re-initializing database at {}", config.database.url);

    let connection_pool = create_shared_connection_pool(&config.database.url, 1);
    let mut conn = connection_pool
        .pool
        .get()
        .expect("Failed to get DB connection");

    conn.revert_all_migrations(MIGRATIONS)
        .expect("Failed to revert migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    info!("Initialized the database");
    Ok(())
}

/// Function to seed the database with sample data
fn seed_db(config: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    info!("Seeding database at {}", config.database.url);

    let connection_pool = create_shared_connection_pool(&config.database.url, 1);
    let mut conn = connection_pool
        .pool
        .get()
        .expect("Failed to get DB connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    drop(conn);

    let dal = DAL::new(connection_pool.pool.clone());
    if utils::seed_database(&dal)? {
        info!("Seeded the database with sample CIs and relationships");
    } else {
        info!("Database already seeded. Run 'init-db' first to re-seed.");
    }
    Ok(())
}

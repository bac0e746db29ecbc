//! # CMDB Config Module
//!
//! Common configuration framework for the CMDB crates.
//!
//! # Variable Naming Convention
//!
//! - Struct fields use snake_case (e.g., `database`, `log`)
//! - Environment variables use SCREAMING_SNAKE_CASE and are prefixed with
//!   "CMDB__" (e.g., `CMDB__DATABASE__URL`)
//! - Configuration file keys use snake_case (e.g., `database.url`, `log.level`)
//!
//! # Configuration Overriding
//!
//! Values are loaded and overridden in the following order (later sources take
//! precedence):
//!
//! 1. Default values from the embedded `default.toml` file
//! 2. Values from an optional external configuration file (if provided)
//! 3. Environment variables
//!
//! # Available Environment Variables
//!
//! - `CMDB__DATABASE__URL`: Path or URL of the SQLite database file
//!   Default: "cmdb.db"
//!
//! - `CMDB__LOG__LEVEL`: Log level for the application
//!   Default: "info"
//!   Possible values: "trace", "debug", "info", "warn", "error"
//!
//! - `CMDB__LOG__FORMAT`: Log output format ("text" or "json")
//!   Default: "text"
//!
//! - `CMDB__SERVER__HOST`: Bind address for the HTTP server
//!   Default: "0.0.0.0"
//!
//! - `CMDB__SERVER__PORT`: Bind port for the HTTP server
//!   Default: 3000

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

// Include the default settings file as a string constant
const DEFAULT_SETTINGS: &str = include_str!("../default.toml");

/// Represents the main settings structure for the application
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Database configuration
    pub database: Database,
    /// Logging configuration
    pub log: Log,
    /// HTTP server configuration
    pub server: Server,
}

/// Represents the database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Database {
    /// SQLite database file path (or ":memory:" for an in-memory database)
    pub url: String,
}

/// Represents the logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,
    /// Log format: "text" for human-readable, "json" for structured JSON
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Represents the HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Settings {
    /// Creates a new `Settings` instance
    ///
    /// # Arguments
    ///
    /// * `file` - An optional path to a configuration file
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the `Settings` instance or a `ConfigError`
    pub fn new(file: Option<String>) -> Result<Self, ConfigError> {
        // Start with default settings from the embedded TOML file
        let mut s = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));

        // If a configuration file is provided, add it as a source
        s = match file {
            Some(x) => s.add_source(File::with_name(x.as_str())),
            None => s,
        };

        // Add environment variables as a source, prefixed with "CMDB" and using "__" as a separator
        s = s.add_source(Environment::with_prefix("CMDB").separator("__"));

        // Build the configuration
        let settings = s.build()?;

        // Deserialize the configuration into a Settings instance
        settings.try_deserialize()
    }
}

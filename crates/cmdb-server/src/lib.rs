//! # CMDB Server
//!
//! `cmdb-server` is the application crate of the CMDB: it owns the database
//! connection pool, the Data Access Layer for configuration items and their
//! relationships, the JSON API, and the server-rendered HTML UI.

pub mod api;
pub mod dal;
pub mod db;
pub mod utils;
pub mod web;

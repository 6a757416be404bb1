//! Todo Server Library
//!
//! This library provides the process-level plumbing for the todo service:
//! configuration loading, logging setup, database selection and server
//! initialization.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::{load_dotenv, Config};
pub use setup::{
    connect_database, create_repository, create_server, ensure_database_directory,
    initialize_app, run_migrations, DatabaseBackend,
};
pub use telemetry::init_telemetry;

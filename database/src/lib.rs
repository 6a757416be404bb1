//! Database crate for the todo service
//!
//! This crate provides the SQLite and PostgreSQL implementations of the
//! `TodoRepository` trait, together with their schema migrations.
//!
//! # Features
//!
//! - SQLite support with WAL mode for file databases and a pinned single
//!   connection for in-memory databases
//! - PostgreSQL support with a server version check on connect
//! - Embedded migrations per backend
//! - Driver errors mapped onto `RecordNotFound` / `Persistence`
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::SqliteTodoRepository;
//! use todo_core::repository::TodoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTodoRepository::new("sqlite::memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     Ok(())
//! }
//! ```

mod common;
mod postgres;
mod sqlite;

pub use common::{
    is_version_at_least, postgres_major_version, PoolSettings, FETCH_CONTEXT,
    MIN_POSTGRES_MAJOR, SAVE_CONTEXT,
};
pub use postgres::PostgresTodoRepository;
pub use sqlite::SqliteTodoRepository;

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::TodoItem,
    repository::TodoRepository,
};

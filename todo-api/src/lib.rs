//! HTTP layer for the todo service
//!
//! This crate turns HTTP requests into repository calls. It provides:
//!
//! - The validation policy for new todo items
//! - A framework-independent [`TodoHandler`]
//! - Request and response bodies, and the mapping of failures to status codes
//! - The axum router with per-route handler names and request logging
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_api::{TodoHandler, TodoServer};
//! # use todo_core::{TodoItem, TodoRepository, TodoError};
//! # use async_trait::async_trait;
//! # struct NullRepo;
//! # #[async_trait]
//! # impl TodoRepository for NullRepo {
//! #     async fn create(&self, _todo: &TodoItem) -> todo_core::Result<()> { Ok(()) }
//! #     async fn get_by_id(&self, _id: uuid::Uuid) -> todo_core::Result<TodoItem> { Err(TodoError::RecordNotFound) }
//! # }
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
//!     // In real usage, you would use database::SqliteTodoRepository
//!     let repository = Arc::new(NullRepo);
//!     let handler = TodoHandler::new(repository, tracing::info_span!("todo"));
//!     TodoServer::new(handler)
//!         .serve("127.0.0.1:8080", async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handler;
pub mod request_logger;
pub mod serialization;
pub mod server;
pub mod validation;

// Re-export key types for easier usage
pub use error::ApiError;
pub use handler::TodoHandler;
pub use request_logger::LOG_SOURCE_HEADER;
pub use serialization::{CreateTodoRequest, CreatedTodo, ErrorBody, TodoView};
pub use server::{
    TodoServer, CREATE_TODO_ITEM, GET_TODO_ITEM, HANDLER_NAME_HEADER, TODO_COLLECTION_PATH,
    TODO_COLLECTION_PATH_BARE, TODO_ITEM_PATH,
};
pub use validation::{validate_new_todo, ValidationError, MAX_DESCRIPTION_LENGTH};

// Re-export core types for external consumers
pub use todo_core::{TodoError, TodoItem, TodoRepository};

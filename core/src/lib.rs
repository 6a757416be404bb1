//! Todo Core Library
//!
//! This crate provides the domain model and the storage contract for the todo
//! service. The HTTP layer and every storage backend depend on the types
//! defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `TodoItem` entity and the zero-timestamp sentinel
//! - [`error`] - Error kinds a repository can report
//! - [`repository`] - Repository trait for data persistence
//!
//! # Example
//!
//! ```rust
//! use todo_core::{TodoError, TodoItem};
//! use chrono::Utc;
//!
//! let item = TodoItem::new("Write the report".to_string(), Utc::now());
//! assert!(!item.id.is_nil());
//!
//! let error = TodoError::RecordNotFound;
//! assert!(error.is_not_found());
//! ```

pub mod error;
pub mod models;
pub mod repository;

pub use error::{Result, TodoError};
pub use models::{is_zero_timestamp, zero_timestamp, TodoItem};
pub use repository::TodoRepository;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "todo-core");
    }

    #[test]
    fn test_re_exports() {
        let error = TodoError::persistence("failed to save todo item", "boom");
        assert!(!error.is_not_found());
        assert!(is_zero_timestamp(&zero_timestamp()));
    }
}

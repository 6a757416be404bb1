//! Mock implementations and test utilities for the todo service
//!
//! This crate provides the testing infrastructure shared by the other crates:
//! - An in-memory `TodoRepository` with error injection and call tracking
//! - Builders and fixtures for todo items
//! - Random data generators and property-based testing strategies
//! - A contract suite every repository implementation must pass

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::MockTodoRepository;

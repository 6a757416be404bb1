//! Mock implementation of the TodoRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Error injection capabilities
//! - Call tracking for verification

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use todo_core::{Result, TodoError, TodoItem, TodoRepository};
use uuid::Uuid;

/// In-memory TodoRepository for testing
///
/// Clones share the same storage, so a test can keep a handle for
/// verification after passing one to the code under test.
#[derive(Clone)]
pub struct MockTodoRepository {
    items: Arc<Mutex<HashMap<Uuid, TodoItem>>>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create mock repository with pre-populated items
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let map = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: Arc::new(Mutex::new(map)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Snapshot of a stored item, bypassing call tracking
    pub fn stored(&self, id: Uuid) -> Option<TodoItem> {
        self.items.lock().get(&id).cloned()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.contains(method)),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        match self.error_injection.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, todo: &TodoItem) -> Result<()> {
        self.record_call_with_params("create", &format!("id={}", todo.id));
        self.check_error_injection()?;

        let mut items = self.items.lock();
        if items.contains_key(&todo.id) {
            return Err(TodoError::persistence(
                "failed to save todo item",
                format!("duplicate id {}", todo.id),
            ));
        }
        items.insert(todo.id, todo.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<TodoItem> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        self.items
            .lock()
            .get(&id)
            .cloned()
            .ok_or(TodoError::RecordNotFound)
    }
}

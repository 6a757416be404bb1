use async_trait::async_trait;
use uuid::Uuid;

use crate::{error::Result, models::TodoItem};

/// Storage capabilities the HTTP layer relies on.
///
/// This is the only seam between request handling and persistence; SQLite,
/// PostgreSQL and the in-memory mock all sit behind it. Implementations must
/// be thread-safe and support concurrent access.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a fully populated item
    ///
    /// # Arguments
    /// * `todo` - The item to store; its `id` has already been assigned
    ///
    /// # Returns
    /// * `Ok(())` - The item was stored
    /// * `Err(TodoError::Persistence)` - On any storage failure. Never
    ///   `RecordNotFound`.
    async fn create(&self, todo: &TodoItem) -> Result<()>;

    /// Fetch a stored item by its identifier
    ///
    /// # Arguments
    /// * `id` - The identifier to look up
    ///
    /// # Returns
    /// * `Ok(TodoItem)` - A copy of the stored item
    /// * `Err(TodoError::RecordNotFound)` - If no item has that identifier
    /// * `Err(TodoError::Persistence)` - On any other storage failure
    async fn get_by_id(&self, id: Uuid) -> Result<TodoItem>;
}

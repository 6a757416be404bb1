use std::sync::Arc;

use todo_core::{TodoItem, TodoRepository};
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::{
    error::ApiError,
    serialization::{decode_create_request, CreatedTodo, TodoView},
    validation::validate_new_todo,
};

/// Request handling for todo items, independent of the HTTP framework
///
/// Holds the repository and the handler's own span. Both are fixed at
/// construction and shared read-only by concurrent requests. Each operation
/// span is a child of the caller's current span (the per-request span when
/// served over HTTP) and links back to the handler span; outside any span the
/// handler span is the parent.
pub struct TodoHandler {
    repository: Arc<dyn TodoRepository>,
    span: Span,
}

impl TodoHandler {
    /// Create a handler
    ///
    /// # Arguments
    /// * `repository` - Storage backend
    /// * `span` - Handler span, linked from every operation's span
    pub fn new(repository: Arc<dyn TodoRepository>, span: Span) -> Self {
        Self { repository, span }
    }

    fn operation_parent(&self) -> Span {
        let current = Span::current();
        if current.is_none() {
            self.span.clone()
        } else {
            current
        }
    }

    /// Decode, validate and store a new item
    ///
    /// # Arguments
    /// * `body` - Raw request body, expected to be JSON
    ///
    /// # Returns
    /// * `Ok(CreatedTodo)` - The identifier of the stored item
    /// * `Err(ApiError)` - Decode, validation or persistence failure
    pub async fn create_todo_item(&self, body: &[u8]) -> Result<CreatedTodo, ApiError> {
        let parent = self.operation_parent();
        let span = tracing::info_span!(parent: &parent, "create_todo_item", id = tracing::field::Empty);
        span.follows_from(&self.span);

        async move {
            let request = decode_create_request(body).inspect_err(|e| {
                tracing::warn!(error = %e, "Rejected undecodable create request");
            })?;

            let due_date = validate_new_todo(&request.description, request.due_date.as_ref())
                .inspect_err(|e| tracing::warn!(error = %e, "Rejected invalid todo item"))?;

            let item = TodoItem::new(request.description, due_date);
            Span::current().record("id", tracing::field::display(item.id));

            if let Err(e) = self.repository.create(&item).await {
                tracing::error!(error = %e, "Failed to save todo item");
                return Err(ApiError::SaveFailed(e));
            }

            tracing::info!("Todo item created");
            Ok(CreatedTodo { id: item.id })
        }
        .instrument(span)
        .await
    }

    /// Look up an item by the identifier taken from the request path
    ///
    /// # Arguments
    /// * `raw_id` - Path segment, expected to be a UUID
    ///
    /// # Returns
    /// * `Ok(TodoView)` - The stored item
    /// * `Err(ApiError::InvalidId)` - The segment is not a UUID
    /// * `Err(ApiError::NotFound)` - No item has that identifier
    /// * `Err(ApiError::FetchFailed)` - Any other storage failure
    pub async fn get_todo_item(&self, raw_id: &str) -> Result<TodoView, ApiError> {
        let parent = self.operation_parent();
        let span = tracing::info_span!(parent: &parent, "get_todo_item", id = %raw_id);
        span.follows_from(&self.span);

        async move {
            let id = Uuid::parse_str(raw_id).map_err(|e| {
                tracing::warn!(error = %e, "Rejected malformed todo id");
                ApiError::InvalidId {
                    value: raw_id.to_string(),
                    reason: e.to_string(),
                }
            })?;

            let item = self.repository.get_by_id(id).await.map_err(|e| {
                if e.is_not_found() {
                    tracing::info!("Todo item not found");
                } else {
                    tracing::error!(error = %e, "Failed to fetch todo item");
                }
                ApiError::from_fetch(e)
            })?;

            Ok(TodoView::from(item))
        }
        .instrument(span)
        .await
    }
}

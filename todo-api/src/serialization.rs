//! Wire formats for the todo endpoints
//!
//! Handles conversion between the JSON bodies on the wire and `TodoItem`.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use todo_core::TodoItem;
use uuid::Uuid;

use crate::error::ApiError;

/// Body of `POST /api/v0/todo/`
///
/// A missing `description` decodes as empty and a missing or `null`
/// `due_date` decodes as `None`, so both reach validation instead of failing
/// here.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
}

/// Body of a successful create
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedTodo {
    pub id: Uuid,
}

/// Body of a successful fetch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoView {
    pub id: Uuid,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

impl From<TodoItem> for TodoView {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            due_date: item.due_date,
        }
    }
}

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Decode a create request from raw bytes, whatever the Content-Type
pub fn decode_create_request(body: &[u8]) -> Result<CreateTodoRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_request() {
        let request = decode_create_request(
            br#"{"description":"Buy groceries","due_date":"2025-12-31T23:59:59Z"}"#,
        )
        .unwrap();

        assert_eq!(request.description, "Buy groceries");
        assert_eq!(
            request.due_date.unwrap().to_rfc3339(),
            "2025-12-31T23:59:59+00:00"
        );
    }

    #[test]
    fn test_decode_missing_and_null_fields() {
        let request = decode_create_request(br#"{}"#).unwrap();
        assert!(request.description.is_empty());
        assert!(request.due_date.is_none());

        let request = decode_create_request(br#"{"description":"x","due_date":null}"#).unwrap();
        assert!(request.due_date.is_none());
    }

    #[test]
    fn test_decode_failures() {
        for body in [
            &b"not json"[..],
            br#"{"description": 42}"#,
            br#"{"description":"x","due_date":"tomorrow"}"#,
            br#"[]"#,
            b"",
        ] {
            match decode_create_request(body) {
                Err(ApiError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {body:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_view_shape() {
        let due = DateTime::parse_from_rfc3339("2025-12-31T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        let item = TodoItem::with_id(Uuid::nil(), "Buy groceries".to_string(), due);

        let json = serde_json::to_value(TodoView::from(item)).unwrap();
        assert_eq!(
            json,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "description": "Buy groceries",
                "due_date": "2025-12-31T23:59:59Z"
            })
        );
    }
}

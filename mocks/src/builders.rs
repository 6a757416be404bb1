//! Builder pattern implementation for easy test data construction

use chrono::{DateTime, Duration, TimeZone, Utc};
use todo_core::TodoItem;
use uuid::Uuid;

/// Builder for constructing TodoItem instances in tests
pub struct TodoItemBuilder {
    item: TodoItem,
}

impl Default for TodoItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoItemBuilder {
    /// Create new builder with a random id and a fixed due date
    pub fn new() -> Self {
        let due_date = Utc
            .with_ymd_and_hms(2025, 12, 31, 23, 59, 59)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            item: TodoItem::new("Test todo".to_string(), due_date),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.item.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.item.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.item.due_date = due_date;
        self
    }

    /// Due the given number of days from now, truncated to whole seconds
    pub fn due_in_days(mut self, days: i64) -> Self {
        let now = Utc::now() + Duration::days(days);
        self.item.due_date = Utc
            .timestamp_opt(now.timestamp(), 0)
            .single()
            .unwrap_or(now);
        self
    }

    pub fn build(self) -> TodoItem {
        self.item
    }
}

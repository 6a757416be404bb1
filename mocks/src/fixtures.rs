//! Standard test fixtures for consistent testing

use chrono::{DateTime, TimeZone, Utc};
use todo_core::TodoItem;
use uuid::Uuid;

/// Longest description the HTTP layer accepts
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

const SAMPLES: [(&str, &str, (i32, u32, u32, u32, u32, u32)); 5] = [
    (
        "3f6c1a4e-9966-4f1c-a2a9-1b8df67f8cc3",
        "Buy groceries",
        (2025, 3, 1, 18, 0, 0),
    ),
    (
        "c2e89319-e563-4a0b-9ef0-349beb3ef672",
        "Finish project report",
        (2025, 3, 5, 9, 30, 0),
    ),
    (
        "8a2b2a84-0583-4a58-8c11-7e7b4d62c06a",
        "Call the electrician",
        (2025, 3, 7, 12, 0, 0),
    ),
    (
        "ad8c040c-d2c0-4dd8-9f2f-dc191b020b8d",
        "Schedule dentist appointment",
        (2025, 4, 2, 8, 15, 0),
    ),
    (
        "02c2a8a8-2b2b-4ce5-9d33-9b18e4b0e15f",
        "Plan weekend trip",
        (2025, 4, 11, 17, 45, 0),
    ),
];

fn utc(parts: (i32, u32, u32, u32, u32, u32)) -> DateTime<Utc> {
    let (y, mo, d, h, mi, s) = parts;
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .unwrap_or_default()
}

/// Create a basic test item with a fixed due date
pub fn create_test_todo() -> TodoItem {
    TodoItem::new(
        "A standard test todo".to_string(),
        utc((2025, 12, 31, 23, 59, 59)),
    )
}

/// Five well-known items with stable identifiers
pub fn sample_todos() -> Vec<TodoItem> {
    SAMPLES
        .iter()
        .map(|(id, description, due)| {
            TodoItem::with_id(
                Uuid::parse_str(id).unwrap_or_default(),
                description.to_string(),
                utc(*due),
            )
        })
        .collect()
}

/// Multiple unique items with due dates one day apart
pub fn create_test_todos(count: usize) -> Vec<TodoItem> {
    let start = utc((2025, 1, 1, 9, 0, 0));
    (0..count)
        .map(|i| {
            TodoItem::new(
                format!("Test todo {}", i + 1),
                start + chrono::Duration::days(i as i64),
            )
        })
        .collect()
}

/// Item whose description is exactly at the accepted limit
pub fn create_max_length_todo() -> TodoItem {
    TodoItem::new(
        "x".repeat(MAX_DESCRIPTION_CHARS),
        utc((2025, 12, 31, 23, 59, 59)),
    )
}

/// Item with a multi-byte description
pub fn create_unicode_todo() -> TodoItem {
    TodoItem::new(
        "Kaufe Brötchen 🥐 und café für das Büro".to_string(),
        utc((2025, 6, 15, 7, 0, 0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_todos_are_stable() {
        let samples = sample_todos();
        assert_eq!(samples.len(), 5);
        assert_eq!(
            samples[0].id.to_string(),
            "3f6c1a4e-9966-4f1c-a2a9-1b8df67f8cc3"
        );
        assert_eq!(samples[4].description, "Plan weekend trip");
        assert_eq!(samples, sample_todos());
    }

    #[test]
    fn test_edge_case_fixtures() {
        assert_eq!(
            create_max_length_todo().description.chars().count(),
            MAX_DESCRIPTION_CHARS
        );
        let unicode = create_unicode_todo();
        assert!(unicode.description.len() > unicode.description.chars().count());
    }

    #[test]
    fn test_create_test_todos_unique() {
        let todos = create_test_todos(4);
        assert_eq!(todos.len(), 4);
        assert_ne!(todos[0].id, todos[1].id);
        assert!(todos[3].due_date > todos[0].due_date);
    }
}

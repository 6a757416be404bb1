//! Custom assertion helpers for testing

use chrono::{DateTime, Utc};
use todo_core::{TodoError, TodoItem};

/// Assert items are equal field by field, with a clear message per field
pub fn assert_todo_equals(actual: &TodoItem, expected: &TodoItem) {
    assert_eq!(actual.id, expected.id, "Todo IDs don't match");
    assert_eq!(
        actual.description, expected.description,
        "Todo descriptions don't match"
    );
    assert_eq!(actual.due_date, expected.due_date, "Todo due dates don't match");
}

/// Assert two instants are equal at microsecond precision, the finest
/// resolution PostgreSQL keeps
pub fn assert_same_instant(actual: DateTime<Utc>, expected: DateTime<Utc>) {
    assert_eq!(
        actual.timestamp_micros(),
        expected.timestamp_micros(),
        "Instants differ: {actual} vs {expected}"
    );
}

/// Assert the result is a RecordNotFound error
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, TodoError>) {
    match result {
        Err(TodoError::RecordNotFound) => {}
        other => panic!("Expected RecordNotFound, got: {other:?}"),
    }
}

/// Assert the result is a persistence failure
pub fn assert_persistence_error<T: std::fmt::Debug>(result: &Result<T, TodoError>) {
    match result {
        Err(TodoError::Persistence { .. }) => {}
        other => panic!("Expected persistence failure, got: {other:?}"),
    }
}

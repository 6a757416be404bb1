//! Input rules for new todo items
//!
//! Rules are checked in a fixed order and only the first violation is
//! reported: empty description, then description length, then due date.

use chrono::{DateTime, FixedOffset, Utc};
use thiserror::Error;
use todo_core::is_zero_timestamp;

/// Longest accepted description, in Unicode scalar values
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A violated input rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description is required")]
    EmptyDescription,

    #[error("description exceeds maximum length of 1000 characters")]
    DescriptionTooLong,

    #[error("due_date is required")]
    MissingDueDate,
}

/// Check a decoded creation request.
///
/// # Arguments
/// * `description` - The submitted description
/// * `due_date` - The submitted due date, `None` when absent or `null`
///
/// # Returns
/// The due date normalized to UTC when every rule passes.
pub fn validate_new_todo(
    description: &str,
    due_date: Option<&DateTime<FixedOffset>>,
) -> Result<DateTime<Utc>, ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong);
    }

    match due_date {
        Some(due) if !is_zero_timestamp(due) => Ok(due.with_timezone(&Utc)),
        _ => Err(ValidationError::MissingDueDate),
    }
}

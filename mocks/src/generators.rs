//! Random test data generators using the fake crate
//!
//! Also provides property-based testing strategies for descriptions, due
//! dates and complete items.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::TodoItem;

use crate::fixtures::MAX_DESCRIPTION_CHARS;

/// 2000-01-01T00:00:00Z
const EARLIEST_DUE: i64 = 946_684_800;
/// 2100-01-01T00:00:00Z
const LATEST_DUE: i64 = 4_102_444_800;

/// Generate a realistic description
pub fn generate_description() -> String {
    Sentence(3..10).fake()
}

/// Generate a due date within the next year, at whole-second precision
pub fn generate_due_date() -> DateTime<Utc> {
    let offset = rand::thread_rng().gen_range(60..(365 * 24 * 3600));
    let due = Utc::now() + Duration::seconds(offset);
    Utc.timestamp_opt(due.timestamp(), 0)
        .single()
        .unwrap_or(due)
}

/// Generate a random item with realistic data
pub fn generate_random_todo() -> TodoItem {
    TodoItem::new(generate_description(), generate_due_date())
}

/// Strategy for descriptions the HTTP layer accepts: 1..=1000 characters,
/// including multi-byte ones
pub fn valid_description_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            1 => Just(' '),
            1 => prop::sample::select(vec!['é', 'ß', 'ø', '€', '✓', '🥐']),
        ],
        1..=MAX_DESCRIPTION_CHARS,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for descriptions one or more characters over the limit
pub fn overlong_description_strategy() -> impl Strategy<Value = String> {
    (MAX_DESCRIPTION_CHARS + 1..MAX_DESCRIPTION_CHARS + 500, any::<bool>()).prop_map(
        |(len, multibyte)| {
            let unit = if multibyte { "é" } else { "a" };
            unit.repeat(len)
        },
    )
}

/// Strategy for due dates between 2000 and 2100 at whole-second precision
pub fn due_date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (EARLIEST_DUE..LATEST_DUE).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_default()
    })
}

/// Strategy for complete, valid items
pub fn todo_strategy() -> impl Strategy<Value = TodoItem> {
    (valid_description_strategy(), due_date_strategy())
        .prop_map(|(description, due_date)| TodoItem::new(description, due_date))
}

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task with a description and a due date.
///
/// The identifier is assigned once, when the item is constructed, and is
/// never reassigned afterwards. Length and presence rules for the other
/// fields are enforced by the HTTP layer before an item is built; a
/// `TodoItem` that reaches a repository is assumed to be valid.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::TodoItem;
/// use chrono::{TimeZone, Utc};
///
/// let due = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
/// let item = TodoItem::new("Buy groceries".to_string(), due);
///
/// assert_eq!(item.description, "Buy groceries");
/// assert!(!item.id.is_nil());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    /// Primary key, generated at creation time
    pub id: Uuid,
    /// What needs to be done
    pub description: String,
    /// When it needs to be done by
    pub due_date: DateTime<Utc>,
}

impl TodoItem {
    /// Build a new item with a freshly generated random (v4) identifier.
    pub fn new(description: String, due_date: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), description, due_date)
    }

    /// Build an item around an identifier that already exists, e.g. one read
    /// back from storage.
    pub fn with_id(id: Uuid, description: String, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            due_date,
        }
    }
}

/// `0001-01-01T00:00:00Z`, the "unset" timestamp.
///
/// Clients that serialize an empty date field tend to send this value, so it
/// is treated the same as an absent date rather than as a real day in year 1.
pub fn zero_timestamp() -> DateTime<Utc> {
    let midnight = NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&midnight)
}

/// Whether `timestamp` is the zero sentinel.
pub fn is_zero_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> bool {
    timestamp.with_timezone(&Utc) == zero_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_new_assigns_distinct_ids() {
        let due = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let first = TodoItem::new("Same".to_string(), due);
        let second = TodoItem::new("Same".to_string(), due);

        assert_ne!(first.id, second.id);
        assert_eq!(first.description, second.description);
        assert_eq!(first.due_date, second.due_date);
    }

    #[test]
    fn test_with_id_keeps_identifier() {
        let id = Uuid::parse_str("3f6c1a4e-9966-4f1c-a2a9-1b8df67f8cc3").unwrap();
        let due = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let item = TodoItem::with_id(id, "Buy groceries".to_string(), due);
        assert_eq!(item.id, id);
    }

    #[test]
    fn test_zero_timestamp_detection() {
        assert_eq!(zero_timestamp().to_rfc3339(), "0001-01-01T00:00:00+00:00");
        assert!(is_zero_timestamp(&zero_timestamp()));

        let parsed = DateTime::parse_from_rfc3339("0001-01-01T00:00:00Z").unwrap();
        assert!(is_zero_timestamp(&parsed));

        // Same wall clock in another zone is a different instant
        let offset = FixedOffset::east_opt(3600).unwrap();
        let shifted = offset.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert!(!is_zero_timestamp(&shifted));

        let real = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert!(!is_zero_timestamp(&real));
    }

    #[test]
    fn test_serde_field_names() {
        let id = Uuid::nil();
        let due = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let item = TodoItem::with_id(id, "Test".to_string(), due);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["description"], "Test");
        assert_eq!(json["due_date"], "2025-12-31T23:59:59Z");
    }
}

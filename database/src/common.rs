use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use todo_core::error::TodoError;
use uuid::Uuid;

/// Context attached to every failed insert
pub const SAVE_CONTEXT: &str = "failed to save todo item";

/// Context attached to every failed lookup other than "no rows"
pub const FETCH_CONTEXT: &str = "failed to get todo item";

/// Oldest PostgreSQL major version the service is tested against
pub const MIN_POSTGRES_MAJOR: u32 = 15;

/// Connection pool sizing shared by both backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// How long a caller waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Render a sqlx error as a short human-readable cause
pub fn describe_sqlx_error(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            match db_err.code() {
                Some(code) => format!("database error {code}: {message}"),
                None => format!("database error: {message}"),
            }
        }
        sqlx::Error::PoolTimedOut => "connection pool timeout".to_string(),
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        sqlx::Error::Io(io_err) => format!("database I/O error: {io_err}"),
        _ => format!("database operation failed: {err}"),
    }
}

/// Translate an insert failure. Inserts never report `RecordNotFound`.
pub fn map_save_error(err: sqlx::Error) -> TodoError {
    let error = TodoError::persistence(SAVE_CONTEXT, describe_sqlx_error(&err));
    tracing::error!(error = %error, "Failed to save todo item");
    error
}

/// Translate a lookup failure; the driver's "no rows" becomes `RecordNotFound`
pub fn map_fetch_error(err: sqlx::Error) -> TodoError {
    match err {
        sqlx::Error::RowNotFound => TodoError::RecordNotFound,
        other => {
            let error = TodoError::persistence(FETCH_CONTEXT, describe_sqlx_error(&other));
            tracing::error!(error = %error, "Failed to get todo item");
            error
        }
    }
}

/// Parse an identifier stored as canonical text
pub fn parse_stored_id(raw: &str) -> Result<Uuid, TodoError> {
    Uuid::parse_str(raw).map_err(|e| {
        let error = TodoError::persistence(FETCH_CONTEXT, format!("corrupt id '{raw}': {e}"));
        tracing::error!(error = %error, "Stored todo item has an unreadable id");
        error
    })
}

/// Extract the major version from a `SELECT version()` string such as
/// `PostgreSQL 16.2 on x86_64-pc-linux-gnu, ...`
pub fn postgres_major_version(version: &str) -> Option<u32> {
    version_pattern()?
        .captures(version)
        .and_then(|caps| caps.get(1))
        .and_then(|major| major.as_str().parse().ok())
}

/// `PostgreSQL <major>`, compiled once
fn version_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"PostgreSQL (\d+)").ok())
        .as_ref()
}

/// Whether the reported server version is at least `major`.
/// Unparseable strings count as too old.
pub fn is_version_at_least(version: &str, major: u32) -> bool {
    match postgres_major_version(version) {
        Some(found) => found >= major,
        None => {
            tracing::warn!(version = %version, "Unable to parse PostgreSQL version string");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_pattern_is_compiled_once() {
        let first = version_pattern().unwrap();
        let second = version_pattern().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(postgres_major_version("PostgreSQL 16.2 on x86_64"), Some(16));
        assert_eq!(postgres_major_version("PostgreSQL 9.6.24"), Some(9));
    }

    #[test]
    fn test_row_not_found_becomes_record_not_found() {
        let error = map_fetch_error(sqlx::Error::RowNotFound);
        assert_eq!(error, TodoError::RecordNotFound);
    }

    #[test]
    fn test_other_fetch_errors_are_persistence_failures() {
        let error = map_fetch_error(sqlx::Error::PoolTimedOut);
        assert_eq!(
            error,
            TodoError::persistence(FETCH_CONTEXT, "connection pool timeout")
        );
    }

    #[test]
    fn test_save_errors_never_report_not_found() {
        let error = map_save_error(sqlx::Error::RowNotFound);
        assert!(error.is_persistence());
        assert!(error.to_string().starts_with(SAVE_CONTEXT));

        let error = map_save_error(sqlx::Error::PoolClosed);
        assert_eq!(
            error,
            TodoError::persistence(SAVE_CONTEXT, "connection pool closed")
        );
    }

    #[test]
    fn test_parse_stored_id() {
        let id = parse_stored_id("3f6c1a4e-9966-4f1c-a2a9-1b8df67f8cc3").unwrap();
        assert_eq!(id.to_string(), "3f6c1a4e-9966-4f1c-a2a9-1b8df67f8cc3");

        let error = parse_stored_id("garbage").unwrap_err();
        assert!(error.is_persistence());
    }

    #[test]
    fn test_postgres_version_parsing() {
        let v16 = "PostgreSQL 16.2 on x86_64-pc-linux-gnu, compiled by gcc (GCC) 12.2.0, 64-bit";
        assert_eq!(postgres_major_version(v16), Some(16));
        assert!(is_version_at_least(v16, MIN_POSTGRES_MAJOR));

        let v13 = "PostgreSQL 13.14 (Debian 13.14-1.pgdg120+2)";
        assert_eq!(postgres_major_version(v13), Some(13));
        assert!(!is_version_at_least(v13, MIN_POSTGRES_MAJOR));

        assert_eq!(postgres_major_version("CockroachDB CCL v23.1"), None);
        assert!(!is_version_at_least("CockroachDB CCL v23.1", MIN_POSTGRES_MAJOR));
    }

    #[test]
    fn test_default_pool_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(30));
    }
}

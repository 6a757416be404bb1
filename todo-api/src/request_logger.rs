//! Structured request logging middleware
//!
//! Emits one event per request with method, path, status, latency and the
//! name of the handler that served it.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;

use crate::server::HANDLER_NAME_HEADER;

/// Optional request header naming the caller; recorded on the request span
pub const LOG_SOURCE_HEADER: &str = "x-log-source";

/// Maximum length for a log source value before truncation
const MAX_SOURCE_LENGTH: usize = 64;

/// Truncation suffix for long values
const TRUNCATION_SUFFIX: &str = "...";

/// Handler name logged when the router matched no route
const UNROUTED: &str = "unrouted";

/// Request logging middleware
///
/// Everything logged while the request is being served carries the
/// `request` span's fields. `TodoHandler` opens its operation spans under the
/// current span, so its events carry them too.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        log_source = tracing::field::Empty,
    );
    if let Some(source) = request
        .headers()
        .get(LOG_SOURCE_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        span.record("log_source", truncate_string(source, MAX_SOURCE_LENGTH).as_str());
    }

    let response = next.run(request).instrument(span.clone()).await;

    let handler = response
        .headers()
        .get(HANDLER_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNROUTED);
    let status = response.status();
    let latency_ms = start_time.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), latency_ms, handler, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, handler, "request completed");
        }
    });

    response
}

/// Truncate to at most `max_length` characters, suffix included
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let keep = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
        let mut truncated: String = input.chars().take(keep).collect();
        truncated.push_str(TRUNCATION_SUFFIX);
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("this is a very long string", 10), "this is...");
        assert_eq!(truncate_string("exactly10c", 10), "exactly10c");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ééééééééééé", 5), "éé...");
        assert_eq!(truncate_string("🥐🥐", 2), "🥐🥐");
    }
}

//! Error handling for the HTTP layer
//!
//! Maps validation and repository failures to status codes and JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::TodoError;

use crate::{serialization::ErrorBody, validation::ValidationError};

/// Every way a request can fail
#[derive(Error, Debug)]
pub enum ApiError {
    /// The body could not be decoded
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The body exceeded the router's size limit
    #[error("Invalid input: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid UUID {value}: {reason}")]
    InvalidId { value: String, reason: String },

    #[error("record not found")]
    NotFound,

    /// The cause is logged, never sent to the client
    #[error("Failed to save todo item")]
    SaveFailed(#[source] TodoError),

    #[error("Failed to fetch todo item")]
    FetchFailed(#[source] TodoError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Validation(_) | ApiError::InvalidId { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::SaveFailed(_) | ApiError::FetchFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the client is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Classify a lookup failure
    pub fn from_fetch(err: TodoError) -> Self {
        match err {
            TodoError::RecordNotFound => ApiError::NotFound,
            other => ApiError::FetchFailed(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::MissingDueDate).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("length limit exceeded".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::SaveFailed(TodoError::persistence("failed to save todo item", "x"))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(ApiError::NotFound.is_client_error());
    }

    #[test]
    fn test_messages_hide_persistence_cause() {
        let cause = TodoError::persistence("failed to get todo item", "connection refused");
        let error = ApiError::FetchFailed(cause.clone());

        assert_eq!(error.to_string(), "Failed to fetch todo item");
        assert_eq!(
            error.source().map(|s| s.to_string()),
            Some(cause.to_string())
        );
    }

    #[test]
    fn test_from_fetch_classification() {
        assert!(matches!(
            ApiError::from_fetch(TodoError::RecordNotFound),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_fetch(TodoError::persistence("failed to get todo item", "x")),
            ApiError::FetchFailed(_)
        ));
    }

    #[test]
    fn test_invalid_id_message() {
        let error = ApiError::InvalidId {
            value: "not-a-uuid".into(),
            reason: "invalid character".into(),
        };
        assert_eq!(error.to_string(), "Invalid UUID not-a-uuid: invalid character");
    }

    #[test]
    fn test_validation_message_is_transparent() {
        let error = ApiError::from(ValidationError::EmptyDescription);
        assert_eq!(error.to_string(), "description is required");
    }
}

use thiserror::Error;

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Outcomes a repository can report besides success.
///
/// Storage backends translate their own driver errors into exactly one of
/// these kinds, so callers never have to know which driver produced them.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let missing = TodoError::RecordNotFound;
/// assert!(missing.is_not_found());
///
/// let failed = TodoError::persistence("failed to save todo item", "disk I/O error");
/// assert!(failed.is_persistence());
/// assert_eq!(failed.to_string(), "failed to save todo item: disk I/O error");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No stored item has the requested identifier
    #[error("record not found")]
    RecordNotFound,

    /// Any other storage failure (connectivity, constraint, driver internals)
    #[error("{context}: {message}")]
    Persistence { context: String, message: String },
}

impl TodoError {
    /// Wrap a storage failure with the operation it interrupted
    pub fn persistence(context: impl Into<String>, cause: impl ToString) -> Self {
        Self::Persistence {
            context: context.into(),
            message: cause.to_string(),
        }
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::RecordNotFound)
    }

    /// Check if this error indicates a storage failure
    pub fn is_persistence(&self) -> bool {
        matches!(self, TodoError::Persistence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TodoError::RecordNotFound.to_string(), "record not found");

        let error = TodoError::persistence("failed to get todo item", "pool timed out");
        assert_eq!(error.to_string(), "failed to get todo item: pool timed out");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TodoError::RecordNotFound.is_not_found());
        assert!(!TodoError::RecordNotFound.is_persistence());

        let error = TodoError::persistence("failed to save todo item", "constraint failed");
        assert!(error.is_persistence());
        assert!(!error.is_not_found());
    }
}

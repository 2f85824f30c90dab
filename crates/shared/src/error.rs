//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Mutation endpoints surface these as a structured failure result
/// (`success = false` plus kind and message) rather than propagating an
/// exception past the orchestration boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found or not owned by the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input validation failed before any write was attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bulk delete matched no transactions owned by the caller.
    #[error("No transactions matched: {0}")]
    NoTransactionsMatched(String),

    /// The underlying atomic unit aborted.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::NoTransactionsMatched(_) => 422,
            Self::StoreFailure(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error kind for API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NoTransactionsMatched(_) => "NO_TRANSACTIONS_MATCHED",
            Self::StoreFailure(_) => "STORE_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::InvalidInput(String::new()).status_code(), 400);
        assert_eq!(
            AppError::NoTransactionsMatched(String::new()).status_code(),
            422
        );
        assert_eq!(AppError::StoreFailure(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AppError::Unauthorized(String::new()).kind(),
            "UNAUTHORIZED"
        );
        assert_eq!(AppError::NotFound(String::new()).kind(), "NOT_FOUND");
        assert_eq!(
            AppError::InvalidInput(String::new()).kind(),
            "INVALID_INPUT"
        );
        assert_eq!(
            AppError::NoTransactionsMatched(String::new()).kind(),
            "NO_TRANSACTIONS_MATCHED"
        );
        assert_eq!(
            AppError::StoreFailure(String::new()).kind(),
            "STORE_FAILURE"
        );
        assert_eq!(AppError::Internal(String::new()).kind(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Unauthorized("msg".into()).to_string(),
            "Authentication failed: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::InvalidInput("msg".into()).to_string(),
            "Invalid input: msg"
        );
        assert_eq!(
            AppError::NoTransactionsMatched("msg".into()).to_string(),
            "No transactions matched: msg"
        );
        assert_eq!(
            AppError::StoreFailure("msg".into()).to_string(),
            "Store failure: msg"
        );
    }
}

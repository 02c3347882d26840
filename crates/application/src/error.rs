//! Application-level errors
//!
//! The error taxonomy of the pipeline. Every fallible port operation returns
//! one of these variants; the retry helper consults `is_retryable` to decide
//! whether a failed provider call is worth repeating.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Retryable provider or network failure (timeout, 429, 5xx)
    #[error("Transient fetch error: {0}")]
    TransientFetch(String),

    /// Malformed observation; dropped with a logged warning, never retried
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An observation with this (location, timestamp) key already exists
    #[error("Duplicate observation key: {0}")]
    DuplicateKey(String),

    /// The store cannot accept writes; fatal to the current tick only
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration error (bad credentials, missing settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Only transient provider failures are retried within a request.
    /// A `StoreUnavailable` error is handled by skipping the rest of the
    /// tick and trying again on the next schedule, never by in-place retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_fetch_is_retryable() {
        assert!(ApplicationError::TransientFetch("503".to_string()).is_retryable());
    }

    #[test]
    fn other_variants_are_not_retryable() {
        assert!(!ApplicationError::Validation("bad humidity".to_string()).is_retryable());
        assert!(!ApplicationError::DuplicateKey("berlin@t".to_string()).is_retryable());
        assert!(!ApplicationError::StoreUnavailable("disk full".to_string()).is_retryable());
        assert!(!ApplicationError::Configuration("no api key".to_string()).is_retryable());
        assert!(!ApplicationError::Internal("oops".to_string()).is_retryable());
    }

    #[test]
    fn domain_error_converts() {
        let err: ApplicationError = DomainError::ValidationError("x".to_string()).into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ApplicationError::DuplicateKey("berlin@2026".to_string()).to_string(),
            "Duplicate observation key: berlin@2026"
        );
        assert_eq!(
            ApplicationError::StoreUnavailable("locked".to_string()).to_string(),
            "Store unavailable: locked"
        );
    }
}

//! Shared helpers for Diesel repository implementations.
//!
//! Repository adapters construct their own port error types; this module
//! extracts readable messages from pool and Diesel failures so those
//! constructions stay one-liners.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Acquire { message } | PoolError::Setup { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub(crate) fn diesel_error_message(error: &diesel::result::Error, operation: &str) -> String {
    let error_message = error.to_string();
    debug!(%error_message, %operation, "diesel operation failed");
    error_message
}

/// Whether a Diesel error is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::acquire("connection refused"), "connection refused")]
    #[case(PoolError::setup("invalid URL"), "invalid URL")]
    fn pool_errors_surface_their_message(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(pool_error_message(error), expected);
    }

    #[test]
    fn diesel_errors_surface_their_message() {
        let message = diesel_error_message(&diesel::result::Error::NotFound, "find cart");
        assert!(message.contains("NotFound") || message.contains("not found"));
    }

    #[test]
    fn not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&diesel::result::Error::NotFound));
    }
}

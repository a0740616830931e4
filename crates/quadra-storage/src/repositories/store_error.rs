//! Translation of SQLite failures into the storage-agnostic error types.
//!
//! The underlying `rusqlite::Error` is logged here and dropped.

use quadra_core::{AuthError, RepositoryError};
use rusqlite::ErrorCode;
use tracing::warn;

fn is_permission_denied(error: &rusqlite::Error) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(ErrorCode::PermissionDenied)
            | Some(ErrorCode::ReadOnly)
            | Some(ErrorCode::AuthorizationForStatementDenied)
    )
}

pub(crate) fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    error.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

/// Map a store failure during `operation` to a [`RepositoryError`].
pub(crate) fn space_store_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> RepositoryError {
    move |error| {
        warn!(operation, error = %error, "Space store call failed");
        if is_permission_denied(&error) {
            RepositoryError::permission_denied(operation)
        } else {
            RepositoryError::unavailable(operation)
        }
    }
}

/// Map a store failure during `operation` to [`AuthError::Unavailable`].
pub(crate) fn auth_store_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> AuthError {
    move |error| {
        warn!(operation, error = %error, "Account store call failed");
        AuthError::Unavailable
    }
}

//! Error handling utilities for repositories

use live_core::error::DomainError;
use live_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "session not found" error
pub fn session_not_found(id: Snowflake) -> DomainError {
    DomainError::SessionNotFound(id)
}

/// Create a "viewer not found" error
pub fn viewer_not_found(id: Snowflake) -> DomainError {
    DomainError::ViewerNotFound(id)
}

/// Create a "message not found" error
pub fn message_not_found(id: Snowflake) -> DomainError {
    DomainError::MessageNotFound(id)
}

/// Create a "showcase not found" error
pub fn showcase_not_found(id: Snowflake) -> DomainError {
    DomainError::ShowcaseNotFound(id)
}

/// Create a "goal not found" error
pub fn goal_not_found(id: Snowflake) -> DomainError {
    DomainError::GoalNotFound(id)
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::SessionStatus;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Session not found: {0}")]
    SessionNotFound(Snowflake),

    #[error("Session not found for room code: {0}")]
    RoomCodeNotFound(String),

    #[error("Viewer not found: {0}")]
    ViewerNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Showcase product not found: {0}")]
    ShowcaseNotFound(Snowflake),

    #[error("Goal not found: {0}")]
    GoalNotFound(Snowflake),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the session owner")]
    NotSessionOwner,

    #[error("Not the message author")]
    NotMessageAuthor,

    #[error("Not the goal owner")]
    NotGoalOwner,

    #[error("Role not allowed to perform this action: {0}")]
    RoleNotAllowed(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Viewer already left the session")]
    ViewerAlreadyLeft,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("Session is not live")]
    SessionNotLive,

    #[error("Session has ended")]
    SessionEnded,

    #[error("Showcase product is sold out")]
    ShowcaseSoldOut,

    #[error("Message has been deleted")]
    MessageDeleted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::SessionNotFound(_) => "UNKNOWN_SESSION",
            Self::RoomCodeNotFound(_) => "UNKNOWN_ROOM_CODE",
            Self::ViewerNotFound(_) => "UNKNOWN_VIEWER",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ShowcaseNotFound(_) => "UNKNOWN_SHOWCASE_PRODUCT",
            Self::GoalNotFound(_) => "UNKNOWN_GOAL",
            Self::AchievementNotFound(_) => "UNKNOWN_ACHIEVEMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotSessionOwner => "NOT_SESSION_OWNER",
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::NotGoalOwner => "NOT_GOAL_OWNER",
            Self::RoleNotAllowed(_) => "ROLE_NOT_ALLOWED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ViewerAlreadyLeft => "VIEWER_ALREADY_LEFT",

            // Business Rules
            Self::InvalidTransition { .. } => "INVALID_SESSION_TRANSITION",
            Self::SessionNotLive => "SESSION_NOT_LIVE",
            Self::SessionEnded => "SESSION_ENDED",
            Self::ShowcaseSoldOut => "SHOWCASE_SOLD_OUT",
            Self::MessageDeleted => "MESSAGE_DELETED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::SessionNotFound(_)
                | Self::RoomCodeNotFound(_)
                | Self::ViewerNotFound(_)
                | Self::MessageNotFound(_)
                | Self::ShowcaseNotFound(_)
                | Self::GoalNotFound(_)
                | Self::AchievementNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotSessionOwner
                | Self::NotMessageAuthor
                | Self::NotGoalOwner
                | Self::RoleNotAllowed(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::ViewerAlreadyLeft
                | Self::InvalidTransition { .. }
                | Self::ShowcaseSoldOut
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::SessionNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_SESSION");

        let err = DomainError::InvalidTransition {
            from: SessionStatus::Ended,
            to: SessionStatus::Live,
        };
        assert_eq!(err.code(), "INVALID_SESSION_TRANSITION");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::SessionNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::ViewerNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::ShowcaseSoldOut.is_conflict());
        assert!(DomainError::ViewerAlreadyLeft.is_conflict());
        assert!(!DomainError::SessionNotLive.is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidTransition {
            from: SessionStatus::Ended,
            to: SessionStatus::Live,
        };
        assert_eq!(err.to_string(), "Invalid session transition: ended -> live");
    }
}

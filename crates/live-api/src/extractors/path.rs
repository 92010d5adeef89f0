//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use live_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with session_id
#[derive(Debug, serde::Deserialize)]
pub struct SessionIdPath {
    pub session_id: String,
}

impl SessionIdPath {
    /// Parse session_id as Snowflake
    pub fn session_id(&self) -> Result<Snowflake, ApiError> {
        self.session_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid session_id format"))
    }
}

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

/// Path parameters with session_id and viewer_id
#[derive(Debug, serde::Deserialize)]
pub struct ViewerIdPath {
    pub session_id: String,
    pub viewer_id: String,
}

impl ViewerIdPath {
    /// Parse session_id as Snowflake
    pub fn session_id(&self) -> Result<Snowflake, ApiError> {
        self.session_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid session_id format"))
    }

    /// Parse viewer_id as Snowflake
    pub fn viewer_id(&self) -> Result<Snowflake, ApiError> {
        self.viewer_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid viewer_id format"))
    }
}

/// Path parameters with session_id and message_id
#[derive(Debug, serde::Deserialize)]
pub struct MessageIdPath {
    pub session_id: String,
    pub message_id: String,
}

impl MessageIdPath {
    /// Parse session_id as Snowflake
    pub fn session_id(&self) -> Result<Snowflake, ApiError> {
        self.session_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid session_id format"))
    }

    /// Parse message_id as Snowflake
    pub fn message_id(&self) -> Result<Snowflake, ApiError> {
        self.message_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid message_id format"))
    }
}

/// Path parameters with session_id and showcase_id
#[derive(Debug, serde::Deserialize)]
pub struct ShowcaseIdPath {
    pub session_id: String,
    pub showcase_id: String,
}

impl ShowcaseIdPath {
    /// Parse session_id as Snowflake
    pub fn session_id(&self) -> Result<Snowflake, ApiError> {
        self.session_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid session_id format"))
    }

    /// Parse showcase_id as Snowflake
    pub fn showcase_id(&self) -> Result<Snowflake, ApiError> {
        self.showcase_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid showcase_id format"))
    }
}

/// Path parameters with goal_id
#[derive(Debug, serde::Deserialize)]
pub struct GoalIdPath {
    pub goal_id: String,
}

impl GoalIdPath {
    /// Parse goal_id as Snowflake
    pub fn goal_id(&self) -> Result<Snowflake, ApiError> {
        self.goal_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid goal_id format"))
    }
}

/// Path parameters for room code lookup
#[derive(Debug, serde::Deserialize)]
pub struct RoomCodePath {
    pub room_code: String,
}

impl RoomCodePath {
    /// Get the room code
    pub fn code(&self) -> &str {
        &self.room_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_parse() {
        let path = SessionIdPath {
            session_id: "123456789".to_string(),
        };
        assert!(path.session_id().is_ok());

        let path = SessionIdPath {
            session_id: "abc".to_string(),
        };
        assert!(path.session_id().is_err());
    }

    #[test]
    fn test_viewer_path_parses_both_ids() {
        let path = ViewerIdPath {
            session_id: "1".to_string(),
            viewer_id: "2".to_string(),
        };
        assert!(path.session_id().is_ok());
        assert!(path.viewer_id().is_ok());
    }
}

//! ChatMessage entity - a message in a session's live chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum chat message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Kind of chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Chat,
    Reaction,
    /// Server-generated announcement
    System,
    /// Host pinned a product to the stream
    ProductHighlight,
}

impl MessageKind {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Reaction => "reaction",
            Self::System => "system",
            Self::ProductHighlight => "product_highlight",
        }
    }
}

impl From<&str> for MessageKind {
    fn from(value: &str) -> Self {
        match value {
            "reaction" => Self::Reaction,
            "system" => Self::System,
            "product_highlight" => Self::ProductHighlight,
            _ => Self::Chat,
        }
    }
}

/// ChatMessage entity (session-scoped, soft-deleted only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Snowflake,
    pub session_id: Snowflake,
    pub viewer_id: Snowflake,
    pub content: String,
    pub kind: MessageKind,
    pub is_deleted: bool,
    pub is_flagged: bool,
    pub reaction_count: i32,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new chat message, validating its content
    pub fn new(
        id: Snowflake,
        session_id: Snowflake,
        viewer_id: Snowflake,
        content: String,
        kind: MessageKind,
    ) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "message content cannot be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_MESSAGE_LENGTH,
            });
        }

        Ok(Self {
            id,
            session_id,
            viewer_id,
            content,
            kind,
            is_deleted: false,
            is_flagged: false,
            reaction_count: 0,
            created_at: Utc::now(),
        })
    }

    /// Create a server-generated system message (not length-capped)
    #[must_use]
    pub fn new_system(id: Snowflake, session_id: Snowflake, viewer_id: Snowflake, content: String) -> Self {
        Self {
            id,
            session_id,
            viewer_id,
            content,
            kind: MessageKind::System,
            is_deleted: false,
            is_flagged: false,
            reaction_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Check if a viewer is the author
    #[inline]
    #[must_use]
    pub fn is_author(&self, viewer_id: Snowflake) -> bool {
        self.viewer_id == viewer_id
    }

    /// Soft-delete the message
    pub fn soft_delete(&mut self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::MessageDeleted);
        }
        self.is_deleted = true;
        Ok(())
    }

    /// Flag the message for moderation
    pub fn flag(&mut self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::MessageDeleted);
        }
        self.is_flagged = true;
        Ok(())
    }

    /// Add one reaction to the message
    pub fn add_reaction(&mut self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::MessageDeleted);
        }
        self.reaction_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Result<ChatMessage, DomainError> {
        ChatMessage::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(100),
            content.to_string(),
            MessageKind::Chat,
        )
    }

    #[test]
    fn test_message_creation() {
        let msg = message("hello chat").unwrap();
        assert_eq!(msg.kind, MessageKind::Chat);
        assert!(!msg.is_deleted);
        assert!(!msg.is_flagged);
        assert!(msg.is_author(Snowflake::new(100)));
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(message("").is_err());
        assert!(message("   ").is_err());
    }

    #[test]
    fn test_content_length_cap() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = message(&long).unwrap_err();
        assert!(matches!(err, DomainError::ContentTooLong { .. }));

        let exactly = "x".repeat(MAX_MESSAGE_LENGTH);
        assert!(message(&exactly).is_ok());
    }

    #[test]
    fn test_soft_delete_is_final() {
        let mut msg = message("bye").unwrap();
        msg.soft_delete().unwrap();
        assert!(msg.is_deleted);

        assert!(msg.soft_delete().is_err());
        assert!(msg.flag().is_err());
        assert!(msg.add_reaction().is_err());
    }

    #[test]
    fn test_reactions_accumulate() {
        let mut msg = message("fire").unwrap();
        msg.add_reaction().unwrap();
        msg.add_reaction().unwrap();
        assert_eq!(msg.reaction_count, 2);
    }
}

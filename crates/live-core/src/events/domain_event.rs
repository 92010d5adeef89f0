//! Domain events - emitted when session/viewer/commerce state changes
//!
//! These events are published on the Redis change-notification channel so
//! connected clients can refresh without polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::SessionStatus;
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Session Events
    // =========================================================================
    SessionCreated(SessionCreatedEvent),
    SessionStatusChanged(SessionStatusChangedEvent),
    SessionEnded(SessionEndedEvent),

    // =========================================================================
    // Viewer Events
    // =========================================================================
    ViewerJoined(ViewerJoinedEvent),
    ViewerLeft(ViewerLeftEvent),

    // =========================================================================
    // Chat Events
    // =========================================================================
    ChatMessageCreated(ChatMessageCreatedEvent),
    ChatMessageDeleted(ChatMessageDeletedEvent),

    // =========================================================================
    // Showcase Events
    // =========================================================================
    ProductHighlighted(ProductHighlightedEvent),
    OrderPlaced(OrderPlacedEvent),

    // =========================================================================
    // Goal Events
    // =========================================================================
    GoalProgressUpdated(GoalProgressUpdatedEvent),
    AchievementEarned(AchievementEarnedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionCreated(_) => "SESSION_CREATED",
            Self::SessionStatusChanged(_) => "SESSION_STATUS_CHANGED",
            Self::SessionEnded(_) => "SESSION_ENDED",
            Self::ViewerJoined(_) => "VIEWER_JOINED",
            Self::ViewerLeft(_) => "VIEWER_LEFT",
            Self::ChatMessageCreated(_) => "CHAT_MESSAGE_CREATED",
            Self::ChatMessageDeleted(_) => "CHAT_MESSAGE_DELETED",
            Self::ProductHighlighted(_) => "PRODUCT_HIGHLIGHTED",
            Self::OrderPlaced(_) => "ORDER_PLACED",
            Self::GoalProgressUpdated(_) => "GOAL_PROGRESS_UPDATED",
            Self::AchievementEarned(_) => "ACHIEVEMENT_EARNED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SessionCreated(e) => e.timestamp,
            Self::SessionStatusChanged(e) => e.timestamp,
            Self::SessionEnded(e) => e.timestamp,
            Self::ViewerJoined(e) => e.timestamp,
            Self::ViewerLeft(e) => e.timestamp,
            Self::ChatMessageCreated(e) => e.timestamp,
            Self::ChatMessageDeleted(e) => e.timestamp,
            Self::ProductHighlighted(e) => e.timestamp,
            Self::OrderPlaced(e) => e.timestamp,
            Self::GoalProgressUpdated(e) => e.timestamp,
            Self::AchievementEarned(e) => e.timestamp,
        }
    }

    /// Session the event belongs to, when session-scoped
    pub fn session_id(&self) -> Option<Snowflake> {
        match self {
            Self::SessionCreated(e) => Some(e.session_id),
            Self::SessionStatusChanged(e) => Some(e.session_id),
            Self::SessionEnded(e) => Some(e.session_id),
            Self::ViewerJoined(e) => Some(e.session_id),
            Self::ViewerLeft(e) => Some(e.session_id),
            Self::ChatMessageCreated(e) => Some(e.session_id),
            Self::ChatMessageDeleted(e) => Some(e.session_id),
            Self::ProductHighlighted(e) => Some(e.session_id),
            Self::OrderPlaced(e) => Some(e.session_id),
            Self::GoalProgressUpdated(_) | Self::AchievementEarned(_) => None,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedEvent {
    pub session_id: Snowflake,
    pub influencer_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusChangedEvent {
    pub session_id: Snowflake,
    pub from: SessionStatus,
    pub to: SessionStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEndedEvent {
    pub session_id: Snowflake,
    pub peak_viewers: i32,
    pub total_unique_viewers: i32,
    pub total_revenue_cents: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerJoinedEvent {
    pub session_id: Snowflake,
    pub viewer_id: Snowflake,
    pub current_viewers: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerLeftEvent {
    pub session_id: Snowflake,
    pub viewer_id: Snowflake,
    pub current_viewers: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageCreatedEvent {
    pub message_id: Snowflake,
    pub session_id: Snowflake,
    pub viewer_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageDeletedEvent {
    pub message_id: Snowflake,
    pub session_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductHighlightedEvent {
    pub showcase_id: Snowflake,
    pub session_id: Snowflake,
    pub product_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub showcase_id: Snowflake,
    pub session_id: Snowflake,
    pub viewer_id: Snowflake,
    pub quantity: i32,
    pub revenue_cents: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressUpdatedEvent {
    pub goal_id: Snowflake,
    pub influencer_id: Snowflake,
    pub current_value: i64,
    pub target_value: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementEarnedEvent {
    pub achievement_id: Snowflake,
    pub influencer_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl SessionCreatedEvent {
    pub fn new(session_id: Snowflake, influencer_id: Snowflake) -> Self {
        Self {
            session_id,
            influencer_id,
            timestamp: Utc::now(),
        }
    }
}

impl SessionStatusChangedEvent {
    pub fn new(session_id: Snowflake, from: SessionStatus, to: SessionStatus) -> Self {
        Self {
            session_id,
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

impl ViewerJoinedEvent {
    pub fn new(session_id: Snowflake, viewer_id: Snowflake, current_viewers: i32) -> Self {
        Self {
            session_id,
            viewer_id,
            current_viewers,
            timestamp: Utc::now(),
        }
    }
}

impl ViewerLeftEvent {
    pub fn new(session_id: Snowflake, viewer_id: Snowflake, current_viewers: i32) -> Self {
        Self {
            session_id,
            viewer_id,
            current_viewers,
            timestamp: Utc::now(),
        }
    }
}

impl ChatMessageCreatedEvent {
    pub fn new(message_id: Snowflake, session_id: Snowflake, viewer_id: Snowflake) -> Self {
        Self {
            message_id,
            session_id,
            viewer_id,
            timestamp: Utc::now(),
        }
    }
}

impl ProductHighlightedEvent {
    pub fn new(showcase_id: Snowflake, session_id: Snowflake, product_id: Snowflake) -> Self {
        Self {
            showcase_id,
            session_id,
            product_id,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::ViewerJoined(ViewerJoinedEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
            42,
        ));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("VIEWER_JOINED"));

        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "VIEWER_JOINED");
        assert_eq!(parsed.session_id(), Some(Snowflake::new(1)));
    }

    #[test]
    fn test_status_change_event() {
        let event = DomainEvent::SessionStatusChanged(SessionStatusChangedEvent::new(
            Snowflake::new(7),
            SessionStatus::Scheduled,
            SessionStatus::Live,
        ));
        assert_eq!(event.event_type(), "SESSION_STATUS_CHANGED");

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"from\":\"scheduled\""));
        assert!(json.contains("\"to\":\"live\""));
    }

    #[test]
    fn test_goal_event_has_no_session() {
        let event = DomainEvent::GoalProgressUpdated(GoalProgressUpdatedEvent {
            goal_id: Snowflake::new(1),
            influencer_id: Snowflake::new(2),
            current_value: 10,
            target_value: 100,
            timestamp: Utc::now(),
        });
        assert!(event.session_id().is_none());
    }
}

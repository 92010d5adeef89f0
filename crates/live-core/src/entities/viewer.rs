//! Viewer entity - one audience member's participation in a session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Kind of participant watching a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewerType {
    Customer,
    Influencer,
    Wholesaler,
    /// Unauthenticated viewer
    #[default]
    Anonymous,
}

impl ViewerType {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Influencer => "influencer",
            Self::Wholesaler => "wholesaler",
            Self::Anonymous => "anonymous",
        }
    }
}

impl From<&str> for ViewerType {
    fn from(value: &str) -> Self {
        match value {
            "customer" => Self::Customer,
            "influencer" => Self::Influencer,
            "wholesaler" => Self::Wholesaler,
            _ => Self::Anonymous,
        }
    }
}

/// Self-reported stream connection quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionQuality {
    Good,
    Degraded,
    Poor,
    #[default]
    Unknown,
}

impl ConnectionQuality {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Degraded => "degraded",
            Self::Poor => "poor",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for ConnectionQuality {
    fn from(value: &str) -> Self {
        match value {
            "good" => Self::Good,
            "degraded" => Self::Degraded,
            "poor" => Self::Poor,
            _ => Self::Unknown,
        }
    }
}

/// Viewer entity (session-scoped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: Snowflake,
    pub session_id: Snowflake,
    pub user_id: Option<Snowflake>,
    pub viewer_type: ViewerType,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    /// Frozen when the viewer leaves (or the session ends)
    pub watch_seconds: i32,
    pub messages_sent: i32,
    pub reactions_sent: i32,
    pub product_clicks: i32,
    pub orders_placed: i32,
    pub connection_quality: ConnectionQuality,
}

impl Viewer {
    /// Create a new viewer joining a session now
    #[must_use]
    pub fn new(
        id: Snowflake,
        session_id: Snowflake,
        user_id: Option<Snowflake>,
        viewer_type: ViewerType,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            viewer_type,
            joined_at: Utc::now(),
            left_at: None,
            watch_seconds: 0,
            messages_sent: 0,
            reactions_sent: 0,
            product_clicks: 0,
            orders_placed: 0,
            connection_quality: ConnectionQuality::Unknown,
        }
    }

    /// Check if the viewer is still watching
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }

    /// Mark the viewer as left at `at`, freezing their watch duration.
    ///
    /// A viewer can leave at most once; the session-end sweep uses the same
    /// method with `actual_end_time` to close viewers who never left.
    pub fn leave(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.left_at.is_some() {
            return Err(DomainError::ViewerAlreadyLeft);
        }
        self.left_at = Some(at);
        self.watch_seconds = (at - self.joined_at).num_seconds().max(0) as i32;
        Ok(())
    }

    /// Live watch duration: frozen value once left, wall-clock while active
    #[must_use]
    pub fn watch_duration_seconds(&self, now: DateTime<Utc>) -> i32 {
        if self.left_at.is_some() {
            self.watch_seconds
        } else {
            (now - self.joined_at).num_seconds().max(0) as i32
        }
    }

    /// Record a chat message sent by this viewer
    pub fn record_message(&mut self) {
        self.messages_sent += 1;
    }

    /// Record a reaction sent by this viewer
    pub fn record_reaction(&mut self) {
        self.reactions_sent += 1;
    }

    /// Record a product click by this viewer
    pub fn record_product_click(&mut self) {
        self.product_clicks += 1;
    }

    /// Record an order placed by this viewer
    pub fn record_order(&mut self) {
        self.orders_placed += 1;
    }

    /// Update the reported connection quality
    pub fn set_connection_quality(&mut self, quality: ConnectionQuality) {
        self.connection_quality = quality;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn viewer() -> Viewer {
        Viewer::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Some(Snowflake::new(100)),
            ViewerType::Customer,
        )
    }

    #[test]
    fn test_viewer_starts_active() {
        let v = viewer();
        assert!(v.is_active());
        assert_eq!(v.watch_seconds, 0);
    }

    #[test]
    fn test_leave_freezes_watch_duration() {
        let mut v = viewer();
        let left = v.joined_at + Duration::seconds(90);
        v.leave(left).unwrap();

        assert!(!v.is_active());
        assert_eq!(v.watch_seconds, 90);
        // Frozen: later reads do not grow
        assert_eq!(v.watch_duration_seconds(left + Duration::hours(1)), 90);
    }

    #[test]
    fn test_leave_only_once() {
        let mut v = viewer();
        let left = v.joined_at + Duration::seconds(30);
        v.leave(left).unwrap();

        let err = v.leave(left + Duration::seconds(30)).unwrap_err();
        assert!(matches!(err, DomainError::ViewerAlreadyLeft));
        assert_eq!(v.watch_seconds, 30);
        assert_eq!(v.left_at, Some(left));
    }

    #[test]
    fn test_leave_before_join_clamps_to_zero() {
        let mut v = viewer();
        v.leave(v.joined_at - Duration::seconds(5)).unwrap();
        assert_eq!(v.watch_seconds, 0);
    }

    #[test]
    fn test_anonymous_viewer_has_no_user() {
        let v = Viewer::new(Snowflake::new(1), Snowflake::new(10), None, ViewerType::Anonymous);
        assert!(v.user_id.is_none());
        assert_eq!(v.viewer_type, ViewerType::Anonymous);
    }
}

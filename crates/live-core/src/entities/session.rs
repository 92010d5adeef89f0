//! LiveSession entity - a scheduled or running live shopping broadcast
//!
//! Sessions move through a fixed lifecycle:
//!
//! ```text
//! scheduled -> live -> (paused <-> live) -> ended
//! cancelled reachable from scheduled/live/paused
//! error     reachable from scheduled/live/paused
//! ```
//!
//! `ended`, `cancelled` and `error` are terminal. Sessions are never
//! hard-deleted; they only change status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{RoomCode, Snowflake};

/// Lifecycle status of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Live,
    Paused,
    Ended,
    Cancelled,
    Error,
}

impl SessionStatus {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Paused => "paused",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }

    /// Whether the session is in a pre-terminal state
    #[inline]
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Scheduled | Self::Live | Self::Paused)
    }

    /// Whether the status admits no further transitions
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Error)
    }

    /// Check whether a transition to `next` is allowed
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Scheduled, Self::Live)
            | (Self::Live, Self::Paused)
            | (Self::Paused, Self::Live)
            | (Self::Live | Self::Paused, Self::Ended) => true,
            (Self::Scheduled | Self::Live | Self::Paused, Self::Cancelled | Self::Error) => true,
            _ => false,
        }
    }
}

impl From<&str> for SessionStatus {
    fn from(value: &str) -> Self {
        match value {
            "live" => Self::Live,
            "paused" => Self::Paused,
            "ended" => Self::Ended,
            "cancelled" => Self::Cancelled,
            "error" => Self::Error,
            _ => Self::Scheduled, // Default for unknown values
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LiveSession entity
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSession {
    pub id: Snowflake,
    pub influencer_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub room_code: RoomCode,
    pub status: SessionStatus,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    // Viewer counters
    pub current_viewers: i32,
    pub peak_viewers: i32,
    pub total_unique_viewers: i32,
    // Engagement counters
    pub total_messages: i32,
    pub total_reactions: i32,
    pub total_shares: i32,
    // Commercial counters
    pub products_showcased: i32,
    pub total_product_clicks: i32,
    pub total_orders: i32,
    pub total_revenue_cents: i64,
    /// Persisted at session end, over all viewers (open ones truncated at end)
    pub avg_watch_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LiveSession {
    /// Create a new scheduled session
    #[must_use]
    pub fn new(id: Snowflake, influencer_id: Snowflake, title: String, room_code: RoomCode) -> Self {
        let now = Utc::now();
        Self {
            id,
            influencer_id,
            title,
            description: None,
            room_code,
            status: SessionStatus::Scheduled,
            scheduled_start: None,
            actual_start: None,
            actual_end: None,
            current_viewers: 0,
            peak_viewers: 0,
            total_unique_viewers: 0,
            total_messages: 0,
            total_reactions: 0,
            total_shares: 0,
            products_showcased: 0,
            total_product_clicks: 0,
            total_orders: 0,
            total_revenue_cents: 0,
            avg_watch_seconds: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the hosting influencer
    #[inline]
    #[must_use]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.influencer_id == user_id
    }

    /// Check if the session is currently broadcasting
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status == SessionStatus::Live
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Transition the session to a new status, enforcing the lifecycle graph
    pub fn transition_to(&mut self, next: SessionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        let now = Utc::now();
        match next {
            SessionStatus::Live if self.actual_start.is_none() => {
                self.actual_start = Some(now);
            }
            SessionStatus::Ended => {
                self.actual_end = Some(now);
            }
            _ => {}
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Start broadcasting
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Live)
    }

    /// Pause the broadcast
    pub fn pause(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Paused)
    }

    /// Resume a paused broadcast
    pub fn resume(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Live)
    }

    /// End the broadcast
    pub fn end(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Ended)
    }

    /// Cancel the session
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Cancelled)
    }

    /// Mark the session as failed
    pub fn mark_error(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Error)
    }

    // =========================================================================
    // Counters
    // =========================================================================

    /// Record a first-time viewer joining
    pub fn record_join(&mut self) {
        self.current_viewers += 1;
        self.total_unique_viewers += 1;
        if self.current_viewers > self.peak_viewers {
            self.peak_viewers = self.current_viewers;
        }
        self.updated_at = Utc::now();
    }

    /// Record a viewer leaving; `current_viewers` never drops below zero
    pub fn record_leave(&mut self) {
        self.current_viewers = (self.current_viewers - 1).max(0);
        self.updated_at = Utc::now();
    }

    /// Record a chat message
    pub fn record_message(&mut self) {
        self.total_messages += 1;
        self.updated_at = Utc::now();
    }

    /// Record a reaction
    pub fn record_reaction(&mut self) {
        self.total_reactions += 1;
        self.updated_at = Utc::now();
    }

    /// Record a share
    pub fn record_share(&mut self) {
        self.total_shares += 1;
        self.updated_at = Utc::now();
    }

    /// Record a product click
    pub fn record_product_click(&mut self) {
        self.total_product_clicks += 1;
        self.updated_at = Utc::now();
    }

    /// Record a completed order and its revenue
    pub fn record_order(&mut self, revenue_cents: i64) {
        self.total_orders += 1;
        self.total_revenue_cents += revenue_cents;
        self.updated_at = Utc::now();
    }

    // =========================================================================
    // Derived metrics
    // =========================================================================

    /// Click-to-order conversion rate; exactly 0.0 when there are no clicks
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        if self.total_product_clicks > 0 {
            f64::from(self.total_orders) / f64::from(self.total_product_clicks)
        } else {
            0.0
        }
    }

    /// Broadcast duration in seconds, if the session has started
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        let start = self.actual_start?;
        let end = self.actual_end.unwrap_or_else(Utc::now);
        Some((end - start).num_seconds().max(0))
    }

    /// Update title/description while the session is editable
    pub fn update_details(
        &mut self,
        title: Option<String>,
        description: Option<Option<String>>,
    ) -> Result<(), DomainError> {
        if self.status == SessionStatus::Ended {
            return Err(DomainError::SessionEnded);
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> LiveSession {
        LiveSession::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "Friday Drop".to_string(),
            RoomCode::generate(),
        )
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut s = session();
        assert_eq!(s.status, SessionStatus::Scheduled);

        s.start().unwrap();
        assert!(s.is_live());
        assert!(s.actual_start.is_some());

        s.pause().unwrap();
        assert_eq!(s.status, SessionStatus::Paused);

        s.resume().unwrap();
        assert!(s.is_live());

        s.end().unwrap();
        assert_eq!(s.status, SessionStatus::Ended);
        assert!(s.actual_end.is_some());
    }

    #[test]
    fn test_no_rollback_from_ended() {
        let mut s = session();
        s.start().unwrap();
        s.end().unwrap();

        let err = s.start().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: SessionStatus::Ended,
                to: SessionStatus::Live,
            }
        ));
        assert!(s.pause().is_err());
        assert!(s.cancel().is_err());
    }

    #[test]
    fn test_cancel_from_active_states() {
        let mut s = session();
        assert!(s.clone().cancel().is_ok());

        s.start().unwrap();
        assert!(s.clone().cancel().is_ok());

        s.pause().unwrap();
        assert!(s.cancel().is_ok());
    }

    #[test]
    fn test_mark_error_from_active_states_only() {
        let mut s = session();
        assert!(s.clone().mark_error().is_ok());

        s.start().unwrap();
        s.pause().unwrap();
        s.mark_error().unwrap();
        assert_eq!(s.status, SessionStatus::Error);
        assert!(s.status.is_terminal());

        // Terminal states admit no error transition
        assert!(s.mark_error().is_err());

        let mut ended = session();
        ended.start().unwrap();
        ended.end().unwrap();
        assert!(ended.mark_error().is_err());
    }

    #[test]
    fn test_scheduled_cannot_end_or_pause() {
        let mut s = session();
        assert!(s.end().is_err());
        assert!(s.pause().is_err());
    }

    #[test]
    fn test_resume_does_not_reset_actual_start() {
        let mut s = session();
        s.start().unwrap();
        let started = s.actual_start;

        s.pause().unwrap();
        s.resume().unwrap();
        assert_eq!(s.actual_start, started);
    }

    #[test]
    fn test_current_viewers_floored_at_zero() {
        let mut s = session();
        s.record_join();
        s.record_leave();
        s.record_leave();
        s.record_leave();
        assert_eq!(s.current_viewers, 0);
    }

    #[test]
    fn test_peak_is_running_maximum() {
        let mut s = session();
        s.record_join();
        s.record_join();
        s.record_join();
        assert_eq!(s.peak_viewers, 3);

        s.record_leave();
        s.record_leave();
        assert_eq!(s.current_viewers, 1);
        assert_eq!(s.peak_viewers, 3);

        s.record_join();
        assert_eq!(s.peak_viewers, 3);
        s.record_join();
        s.record_join();
        assert_eq!(s.peak_viewers, 4);
    }

    #[test]
    fn test_total_unique_never_decreases() {
        let mut s = session();
        s.record_join();
        s.record_join();
        s.record_leave();
        s.record_leave();
        assert_eq!(s.total_unique_viewers, 2);

        s.record_join();
        assert_eq!(s.total_unique_viewers, 3);
    }

    #[test]
    fn test_conversion_rate_zero_without_clicks() {
        let mut s = session();
        assert_eq!(s.conversion_rate(), 0.0);

        s.record_order(1999);
        // Orders without clicks still yield exactly zero
        assert_eq!(s.conversion_rate(), 0.0);

        s.record_product_click();
        s.record_product_click();
        s.record_product_click();
        s.record_product_click();
        assert!((s.conversion_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revenue_accumulates() {
        let mut s = session();
        s.record_order(1500);
        s.record_order(2500);
        assert_eq!(s.total_orders, 2);
        assert_eq!(s.total_revenue_cents, 4000);
    }

    #[test]
    fn test_update_details_rejected_after_end() {
        let mut s = session();
        s.start().unwrap();
        s.end().unwrap();

        let err = s.update_details(Some("New".to_string()), None).unwrap_err();
        assert!(matches!(err, DomainError::SessionEnded));
    }
}

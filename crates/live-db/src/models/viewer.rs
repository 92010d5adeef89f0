//! Viewer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for session_viewers table
#[derive(Debug, Clone, FromRow)]
pub struct ViewerModel {
    pub id: i64,
    pub session_id: i64,
    pub user_id: Option<i64>,
    pub viewer_type: String,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    pub watch_seconds: i32,
    pub messages_sent: i32,
    pub reactions_sent: i32,
    pub product_clicks: i32,
    pub orders_placed: i32,
    pub connection_quality: String,
}

impl ViewerModel {
    /// Check if the viewer is still watching
    #[inline]
    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }
}

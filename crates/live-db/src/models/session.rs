//! Live session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for live_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub id: i64,
    pub influencer_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub room_code: String,
    pub status: String,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub current_viewers: i32,
    pub peak_viewers: i32,
    pub total_unique_viewers: i32,
    pub total_messages: i32,
    pub total_reactions: i32,
    pub total_shares: i32,
    pub products_showcased: i32,
    pub total_product_clicks: i32,
    pub total_orders: i32,
    pub total_revenue_cents: i64,
    pub avg_watch_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionModel {
    /// Check if the session has ended
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.status == "ended"
    }
}

/// Row shape for the influencer-wide SUM aggregate query
#[derive(Debug, Clone, FromRow)]
pub struct SessionTotalsRow {
    pub session_count: i64,
    pub total_unique_viewers: i64,
    pub total_messages: i64,
    pub total_product_clicks: i64,
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    pub avg_peak_viewers: f64,
}

//! Achievement database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for achievements table
#[derive(Debug, Clone, FromRow)]
pub struct AchievementModel {
    pub id: i64,
    pub influencer_id: i64,
    pub title: String,
    pub category: String,
    pub points: i32,
    pub target_value: Option<i64>,
    pub earned_at: DateTime<Utc>,
}

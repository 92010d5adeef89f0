//! Influencer goal database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for influencer_goals table
#[derive(Debug, Clone, FromRow)]
pub struct GoalModel {
    pub id: i64,
    pub influencer_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i64,
    pub current_value: i64,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

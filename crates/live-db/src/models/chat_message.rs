//! Chat message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chat_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub id: i64,
    pub session_id: i64,
    pub viewer_id: i64,
    pub content: String,
    pub kind: String,
    pub is_deleted: bool,
    pub is_flagged: bool,
    pub reaction_count: i32,
    pub created_at: DateTime<Utc>,
}

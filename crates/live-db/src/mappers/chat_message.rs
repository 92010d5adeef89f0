//! Chat message entity <-> model mapper

use live_core::entities::{ChatMessage, MessageKind};
use live_core::value_objects::Snowflake;

use crate::models::ChatMessageModel;

impl From<ChatMessageModel> for ChatMessage {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessage {
            id: Snowflake::new(model.id),
            session_id: Snowflake::new(model.session_id),
            viewer_id: Snowflake::new(model.viewer_id),
            content: model.content,
            kind: MessageKind::from(model.kind.as_str()),
            is_deleted: model.is_deleted,
            is_flagged: model.is_flagged,
            reaction_count: model.reaction_count,
            created_at: model.created_at,
        }
    }
}

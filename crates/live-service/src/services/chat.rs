//! Chat service
//!
//! Live chat messages, moderation, and reactions. Messages are soft-deleted
//! only; session and viewer engagement counters move with every message and
//! reaction.

use tracing::{info, instrument, warn};

use live_core::entities::{ChatMessage, MessageKind, SessionStatus};
use live_core::events::{ChatMessageCreatedEvent, ChatMessageDeletedEvent, DomainEvent};
use live_core::traits::CursorQuery;
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::CreateMessageRequest;
use crate::dto::responses::{MessageResponse, PaginatedResponse};

/// Default page size for message listings
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message to a session's chat
    #[instrument(skip(self, request), fields(session_id = %session_id, viewer_id = %viewer_id))]
    pub async fn create(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let session = self
            .ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id.to_string()))?;

        if !matches!(session.status, SessionStatus::Live | SessionStatus::Paused) {
            return Err(ServiceError::conflict("Chat is closed: session is not live"));
        }

        let viewer = self
            .ctx
            .viewer_repo()
            .find_by_id(viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Viewer", viewer_id.to_string()))?;

        if viewer.session_id != session_id {
            return Err(ServiceError::validation("Viewer belongs to another session"));
        }
        if !viewer.is_active() {
            return Err(ServiceError::conflict("Viewer has left the session"));
        }

        let kind = match request.kind.as_deref() {
            None | Some("chat") => MessageKind::Chat,
            Some("reaction") => MessageKind::Reaction,
            // System and highlight messages are server-generated only
            Some(other) => {
                return Err(ServiceError::validation(format!(
                    "Unknown message kind: {other}"
                )))
            }
        };

        let message = ChatMessage::new(
            self.ctx.generate_id(),
            session_id,
            viewer_id,
            request.content,
            kind,
        )?;

        self.ctx.message_repo().create(&message).await?;

        match kind {
            MessageKind::Reaction => {
                self.ctx.session_repo().record_reaction(session_id).await?;
                self.ctx.viewer_repo().record_reaction(viewer_id).await?;
            }
            _ => {
                self.ctx.session_repo().record_message(session_id).await?;
                self.ctx.viewer_repo().record_message(viewer_id).await?;
            }
        }

        self.publish(DomainEvent::ChatMessageCreated(ChatMessageCreatedEvent::new(
            message.id, session_id, viewer_id,
        )))
        .await;

        Ok(MessageResponse::from(&message))
    }

    /// List a session's messages, newest first, excluding deleted ones
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        session_id: Snowflake,
        before: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<MessageResponse>> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

        let messages = self
            .ctx
            .message_repo()
            .find_by_session(
                session_id,
                CursorQuery {
                    before,
                    after: None,
                    limit,
                },
            )
            .await?;

        let cursor_of_last = messages.last().map(|m| m.id.to_string());
        let data = messages.iter().map(MessageResponse::from).collect();

        Ok(PaginatedResponse::new(data, limit, cursor_of_last))
    }

    /// Soft-delete a message. Allowed for the message's author and the
    /// session's hosting influencer.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<()> {
        let message = self.load(message_id).await?;

        if !self.can_moderate(user_id, &message).await? {
            return Err(ServiceError::permission_denied("delete this message"));
        }

        self.ctx.message_repo().soft_delete(message_id).await?;

        self.publish(DomainEvent::ChatMessageDeleted(ChatMessageDeletedEvent {
            message_id,
            session_id: message.session_id,
            timestamp: chrono::Utc::now(),
        }))
        .await;

        info!(message_id = %message_id, moderator = %user_id, "Message deleted");
        Ok(())
    }

    /// Flag a message for moderation review
    #[instrument(skip(self))]
    pub async fn flag(&self, message_id: Snowflake) -> ServiceResult<()> {
        self.ctx.message_repo().flag(message_id).await?;
        info!(message_id = %message_id, "Message flagged");
        Ok(())
    }

    /// React to a message. Returns the new reaction count.
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        viewer_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<i32> {
        let message = self.load(message_id).await?;

        let viewer = self
            .ctx
            .viewer_repo()
            .find_by_id(viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Viewer", viewer_id.to_string()))?;

        if viewer.session_id != message.session_id {
            return Err(ServiceError::validation("Viewer belongs to another session"));
        }

        let count = self.ctx.message_repo().add_reaction(message_id).await?;
        self.ctx.session_repo().record_reaction(message.session_id).await?;
        self.ctx.viewer_repo().record_reaction(viewer_id).await?;

        Ok(count)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load(&self, message_id: Snowflake) -> ServiceResult<ChatMessage> {
        self.ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))
    }

    /// Author or session host may moderate a message
    async fn can_moderate(&self, user_id: Snowflake, message: &ChatMessage) -> ServiceResult<bool> {
        let session = self
            .ctx
            .session_repo()
            .find_by_id(message.session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", message.session_id.to_string()))?;

        if session.is_owner(user_id) {
            return Ok(true);
        }

        let author = self.ctx.viewer_repo().find_by_id(message.viewer_id).await?;
        Ok(author.is_some_and(|v| v.user_id == Some(user_id)))
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

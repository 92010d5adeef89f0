//! Chat handlers
//!
//! Endpoints for session chat messages, moderation, and reactions.

use axum::{
    extract::{Path, State},
    Json,
};
use live_service::{
    AddReactionRequest, ChatService, CreateMessageRequest, MessageResponse, PaginatedResponse,
};

use crate::extractors::path::{MessageIdPath, SessionIdPath};
use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Reaction count after an add
#[derive(Debug, serde::Serialize)]
pub struct ReactionCountResponse {
    pub reaction_count: i32,
}

/// List messages in a session
///
/// GET /sessions/:session_id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<MessageResponse>>> {
    let session_id = path.session_id()?;
    let service = ChatService::new(state.service_context());
    let response = service
        .list(session_id, pagination.before, Some(i64::from(pagination.limit)))
        .await?;
    Ok(Json(response))
}

/// Post a message to a session
///
/// POST /sessions/:session_id/messages
pub async fn create_message(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let session_id = path.session_id()?;
    let viewer_id = super::parse_id(&request.viewer_id, "viewer_id")?;
    let service = ChatService::new(state.service_context());
    let response = service.create(session_id, viewer_id, request).await?;
    Ok(Created(Json(response)))
}

/// Delete a message (session owner or author)
///
/// DELETE /sessions/:session_id/messages/:message_id
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;
    let service = ChatService::new(state.service_context());
    service.delete(auth.user_id, message_id).await?;
    Ok(NoContent)
}

/// Flag a message for moderation review
///
/// POST /sessions/:session_id/messages/:message_id/flag
pub async fn flag_message(
    State(state): State<AppState>,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;
    let service = ChatService::new(state.service_context());
    service.flag(message_id).await?;
    Ok(NoContent)
}

/// Add a reaction to a message
///
/// POST /sessions/:session_id/messages/:message_id/reactions
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(path): Path<MessageIdPath>,
    ValidatedJson(request): ValidatedJson<AddReactionRequest>,
) -> ApiResult<Json<ReactionCountResponse>> {
    let message_id = path.message_id()?;
    let viewer_id = super::parse_id(&request.viewer_id, "viewer_id")?;
    let service = ChatService::new(state.service_context());
    let reaction_count = service.add_reaction(viewer_id, message_id).await?;
    Ok(Json(ReactionCountResponse { reaction_count }))
}

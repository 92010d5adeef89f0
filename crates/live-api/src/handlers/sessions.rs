//! Live session handlers
//!
//! Endpoints for session lifecycle, listing, sharing, and room tokens.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use live_core::RoomCode;
use live_service::{
    CreateSessionRequest, ListSessionsRequest, PaginatedResponse, RoomTokenResponse,
    SessionResponse, SessionService, UpdateSessionRequest,
};

use crate::extractors::path::{RoomCodePath, SessionIdPath};
use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a new live session
///
/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSessionRequest>,
) -> ApiResult<Created<Json<SessionResponse>>> {
    let user = super::load_user(&state, auth.user_id).await?;
    let service = SessionService::new(state.service_context());
    let response = service.create(&user, request).await?;
    Ok(Created(Json(response)))
}

/// List sessions with optional filters
///
/// GET /sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(request): Query<ListSessionsRequest>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<SessionResponse>>> {
    let service = SessionService::new(state.service_context());
    let response = service
        .list(request, pagination.before, Some(i64::from(pagination.limit)))
        .await?;
    Ok(Json(response))
}

/// Get a session by ID
///
/// GET /sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.get(session_id).await?;
    Ok(Json(response))
}

/// Get a session by its room code
///
/// GET /sessions/by-code/:room_code
pub async fn get_session_by_room_code(
    State(state): State<AppState>,
    Path(path): Path<RoomCodePath>,
) -> ApiResult<Json<SessionResponse>> {
    let code: RoomCode = path
        .code()
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room code format"))?;
    let service = SessionService::new(state.service_context());
    let response = service.get_by_room_code(&code).await?;
    Ok(Json(response))
}

/// Update session details
///
/// PATCH /sessions/:session_id
pub async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateSessionRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service
        .update_details(auth.user_id, session_id, request)
        .await?;
    Ok(Json(response))
}

/// Start a scheduled session (go live)
///
/// POST /sessions/:session_id/start
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.start(auth.user_id, session_id).await?;
    Ok(Json(response))
}

/// Pause a live session
///
/// POST /sessions/:session_id/pause
pub async fn pause_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.pause(auth.user_id, session_id).await?;
    Ok(Json(response))
}

/// Resume a paused session
///
/// POST /sessions/:session_id/resume
pub async fn resume_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.resume(auth.user_id, session_id).await?;
    Ok(Json(response))
}

/// End a session and close out remaining viewers
///
/// POST /sessions/:session_id/end
pub async fn end_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.end(auth.user_id, session_id).await?;
    Ok(Json(response))
}

/// Cancel a scheduled session
///
/// POST /sessions/:session_id/cancel
pub async fn cancel_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let response = service.cancel(auth.user_id, session_id).await?;
    Ok(Json(response))
}

/// Record a share of the session link
///
/// POST /sessions/:session_id/share
pub async fn record_share(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<NoContent> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    service.record_share(session_id).await?;
    Ok(NoContent)
}

/// Issue a signed media-room token for the caller
///
/// POST /sessions/:session_id/room-token
pub async fn create_room_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Created<Json<RoomTokenResponse>>> {
    let session_id = path.session_id()?;
    let service = SessionService::new(state.service_context());
    let token = service.room_token(auth.user_id, session_id).await?;
    Ok(Created(Json(RoomTokenResponse::from(token))))
}

//! Viewer handlers
//!
//! Endpoints for joining and leaving sessions, presence heartbeats,
//! and connection quality reporting.

use axum::{
    extract::{Path, State},
    Json,
};
use live_service::{
    ConnectionQualityRequest, JoinSessionRequest, JoinSessionResponse, PaginatedResponse,
    ViewerResponse, ViewerService,
};

use crate::extractors::path::{SessionIdPath, ViewerIdPath};
use crate::extractors::{OptionalAuthUser, Pagination};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Heartbeat acknowledgement
#[derive(Debug, serde::Serialize)]
pub struct HeartbeatResponse {
    pub active: bool,
}

/// Join a session as a viewer
///
/// Anonymous joins are allowed; authenticated joins are idempotent
/// per user within a session.
///
/// POST /sessions/:session_id/viewers
pub async fn join_session(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Path(path): Path<SessionIdPath>,
    body: Option<Json<JoinSessionRequest>>,
) -> ApiResult<Created<Json<JoinSessionResponse>>> {
    let session_id = path.session_id()?;
    let request = body.map(|b| b.0).unwrap_or_default();

    let user = match auth {
        Some(auth_user) => Some(super::load_user(&state, auth_user.user_id).await?),
        None => None,
    };

    let service = ViewerService::new(state.service_context());
    let response = service.join(session_id, user.as_ref(), request).await?;
    Ok(Created(Json(response)))
}

/// Leave a session
///
/// DELETE /sessions/:session_id/viewers/:viewer_id
pub async fn leave_session(
    State(state): State<AppState>,
    Path(path): Path<ViewerIdPath>,
) -> ApiResult<Json<ViewerResponse>> {
    let viewer_id = path.viewer_id()?;
    let service = ViewerService::new(state.service_context());
    let response = service.leave(viewer_id).await?;
    Ok(Json(response))
}

/// List viewers of a session
///
/// GET /sessions/:session_id/viewers
pub async fn list_viewers(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ViewerResponse>>> {
    let session_id = path.session_id()?;
    let service = ViewerService::new(state.service_context());
    let response = service
        .list(session_id, pagination.before, Some(i64::from(pagination.limit)))
        .await?;
    Ok(Json(response))
}

/// Get a viewer
///
/// GET /sessions/:session_id/viewers/:viewer_id
pub async fn get_viewer(
    State(state): State<AppState>,
    Path(path): Path<ViewerIdPath>,
) -> ApiResult<Json<ViewerResponse>> {
    let viewer_id = path.viewer_id()?;
    let service = ViewerService::new(state.service_context());
    let response = service.get(viewer_id).await?;
    Ok(Json(response))
}

/// Refresh a viewer's watching presence
///
/// POST /sessions/:session_id/viewers/:viewer_id/heartbeat
pub async fn heartbeat(
    State(state): State<AppState>,
    Path(path): Path<ViewerIdPath>,
) -> ApiResult<Json<HeartbeatResponse>> {
    let session_id = path.session_id()?;
    let viewer_id = path.viewer_id()?;
    let service = ViewerService::new(state.service_context());
    let active = service.heartbeat(session_id, viewer_id).await?;
    Ok(Json(HeartbeatResponse { active }))
}

/// Report connection quality for a viewer
///
/// PUT /sessions/:session_id/viewers/:viewer_id/connection-quality
pub async fn set_connection_quality(
    State(state): State<AppState>,
    Path(path): Path<ViewerIdPath>,
    Json(request): Json<ConnectionQualityRequest>,
) -> ApiResult<Json<ViewerResponse>> {
    let viewer_id = path.viewer_id()?;
    let service = ViewerService::new(state.service_context());
    let response = service
        .set_connection_quality(viewer_id, &request.quality)
        .await?;
    Ok(Json(response))
}

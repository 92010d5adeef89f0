//! Maintenance handlers
//!
//! Operational endpoints for expiring stale scheduled sessions, reaping
//! viewers whose presence has lapsed, and marking a session as failed.
//! All admin-gated in the service.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Duration;
use live_service::{ExpireSessionsResponse, MaintenanceService, SessionResponse};

use crate::extractors::path::SessionIdPath;
use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Viewer reap result
#[derive(Debug, serde::Serialize)]
pub struct ReapViewersResponse {
    pub reaped: u32,
}

/// Expire scheduled sessions whose start time has long passed (admin only)
///
/// POST /maintenance/expire-sessions
pub async fn expire_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ExpireSessionsResponse>> {
    let actor = super::load_user(&state, auth.user_id).await?;
    let grace = Duration::minutes(state.config().maintenance.session_grace_minutes);
    let service = MaintenanceService::new(state.service_context());
    let response = service.expire_stale_sessions(&actor, grace).await?;
    Ok(Json(response))
}

/// Mark viewers with lapsed presence as left (admin only)
///
/// POST /maintenance/sessions/:session_id/reap-viewers
pub async fn reap_viewers(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<ReapViewersResponse>> {
    let actor = super::load_user(&state, auth.user_id).await?;
    let session_id = path.session_id()?;
    let service = MaintenanceService::new(state.service_context());
    let reaped = service.reap_session_viewers(&actor, session_id).await?;
    Ok(Json(ReapViewersResponse { reaped }))
}

/// Mark a session as failed after a broadcast fault (admin only)
///
/// POST /maintenance/sessions/:session_id/mark-error
pub async fn mark_session_error(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<SessionResponse>> {
    let actor = super::load_user(&state, auth.user_id).await?;
    let session_id = path.session_id()?;
    let service = MaintenanceService::new(state.service_context());
    let response = service.mark_session_errored(&actor, session_id).await?;
    Ok(Json(response))
}

//! Dashboard handlers
//!
//! Endpoints for influencer performance summaries and achievements.

use axum::{
    extract::{Path, State},
    Json,
};
use live_service::{
    AchievementResponse, AwardAchievementRequest, DashboardService, DashboardSummaryResponse,
};

use crate::extractors::path::UserIdPath;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Get the current influencer's dashboard summary
///
/// GET /dashboard/summary
pub async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardSummaryResponse>> {
    let service = DashboardService::new(state.service_context());
    let response = service.summary(auth.user_id).await?;
    Ok(Json(response))
}

/// List the current user's achievements
///
/// GET /achievements
pub async fn list_own_achievements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AchievementResponse>>> {
    let service = DashboardService::new(state.service_context());
    let response = service.list_achievements(auth.user_id).await?;
    Ok(Json(response))
}

/// List an influencer's achievements
///
/// GET /users/:user_id/achievements
pub async fn list_achievements(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<AchievementResponse>>> {
    let user_id = path.user_id()?;
    let service = DashboardService::new(state.service_context());
    let response = service.list_achievements(user_id).await?;
    Ok(Json(response))
}

/// Award an achievement to an influencer (admin only)
///
/// POST /achievements
pub async fn award_achievement(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AwardAchievementRequest>,
) -> ApiResult<Created<Json<AchievementResponse>>> {
    let actor = super::load_user(&state, auth.user_id).await?;
    let service = DashboardService::new(state.service_context());
    let response = service.award_achievement(&actor, request).await?;
    Ok(Created(Json(response)))
}

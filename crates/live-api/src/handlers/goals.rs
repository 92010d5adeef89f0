//! Goal handlers
//!
//! Endpoints for influencer goals and their progress.

use axum::{
    extract::{Path, State},
    Json,
};
use live_service::{
    CreateGoalRequest, GoalResponse, GoalService, SetGoalProgressRequest, UpdateGoalRequest,
};

use crate::extractors::path::GoalIdPath;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a goal for the current influencer
///
/// POST /goals
pub async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGoalRequest>,
) -> ApiResult<Created<Json<GoalResponse>>> {
    let service = GoalService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the current influencer's goals
///
/// GET /goals
pub async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let service = GoalService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a goal
///
/// GET /goals/:goal_id
pub async fn get_goal(
    State(state): State<AppState>,
    Path(path): Path<GoalIdPath>,
) -> ApiResult<Json<GoalResponse>> {
    let goal_id = path.goal_id()?;
    let service = GoalService::new(state.service_context());
    let response = service.get(goal_id).await?;
    Ok(Json(response))
}

/// Update a goal's details
///
/// PATCH /goals/:goal_id
pub async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GoalIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateGoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal_id = path.goal_id()?;
    let service = GoalService::new(state.service_context());
    let response = service.update(auth.user_id, goal_id, request).await?;
    Ok(Json(response))
}

/// Set a goal's progress (and optionally its status)
///
/// PUT /goals/:goal_id/progress
pub async fn set_goal_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GoalIdPath>,
    ValidatedJson(request): ValidatedJson<SetGoalProgressRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal_id = path.goal_id()?;
    let service = GoalService::new(state.service_context());
    let response = service.set_progress(auth.user_id, goal_id, request).await?;
    Ok(Json(response))
}

/// Delete a goal
///
/// DELETE /goals/:goal_id
pub async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GoalIdPath>,
) -> ApiResult<NoContent> {
    let goal_id = path.goal_id()?;
    let service = GoalService::new(state.service_context());
    service.delete(auth.user_id, goal_id).await?;
    Ok(NoContent)
}

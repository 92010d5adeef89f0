//! User handlers
//!
//! Endpoints for the current user profile and public user lookup.

use axum::{extract::State, Json};
use live_service::{CurrentUserResponse, UpdateUserRequest, UserResponse, UserService};

use crate::extractors::path::UserIdPath;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get the current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete the current user account
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_current(auth.user_id).await?;
    Ok(NoContent)
}

/// Get a user's public profile
///
/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    axum::extract::Path(path): axum::extract::Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;
    let service = UserService::new(state.service_context());
    let response = service.get(user_id).await?;
    Ok(Json(response))
}

//! User profile service

use tracing::{info, instrument};

use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::UpdateUserRequest;
use crate::dto::responses::{CurrentUserResponse, UserResponse};

/// User profile service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's full profile
    #[instrument(skip(self))]
    pub async fn get_current(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Get a user's public profile
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(UserResponse::from(&user))
    }

    /// Update the current user's profile
    #[instrument(skip(self, request))]
    pub async fn update_current(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(display_name) = request.display_name {
            user.set_display_name(display_name);
        }
        if let Some(avatar) = request.avatar {
            let avatar = if avatar.is_empty() { None } else { Some(avatar) };
            user.set_avatar(avatar);
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Soft-delete the current user's account and revoke all their sessions
    #[instrument(skip(self))]
    pub async fn delete_current(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;

        self.ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user_id, "User account deleted");
        Ok(())
    }
}

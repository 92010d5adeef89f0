//! Authentication service
//!
//! Handles registration, login, token refresh, and logout. Access tokens are
//! stateless JWTs; refresh tokens are tracked in Redis so they can be revoked.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use live_cache::RefreshTokenData;
use live_common::auth::{hash_password, validate_password_strength, verify_password};
use live_common::AppError;
use live_core::entities::{User, UserRole};
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::{LoginRequest, RegisterRequest};
use crate::dto::responses::{AuthResponse, TokenResponse, UserResponse};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            warn!(email = %request.email, "Registration rejected: email taken");
            return Err(ServiceError::conflict("Email already registered"));
        }

        // Admin accounts are provisioned out of band, never self-registered
        let role = match request.role.as_deref() {
            Some("admin") => {
                return Err(ServiceError::validation("Cannot self-register as admin"))
            }
            Some(role) => UserRole::from(role),
            None => UserRole::Customer,
        };

        let password_hash = hash_password(&request.password)?;
        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, request.email, request.display_name, role);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        self.issue_tokens(&user).await
    }

    /// Authenticate a user and issue tokens
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !verify_password(&request.password, &hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(&user).await
    }

    /// Exchange a valid refresh token for a new token pair.
    ///
    /// The old refresh token is revoked; refresh tokens are single-use.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<TokenResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let token_id = Self::token_id(refresh_token);
        let stored = self
            .ctx
            .refresh_token_store()
            .validate(&token_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        match stored {
            Some(data) if data.user_id == user_id => {}
            _ => {
                warn!(user_id = %user_id, "Refresh rejected: token not in store");
                return Err(ServiceError::App(AppError::InvalidToken));
            }
        }

        // User may have been deleted since the token was issued
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        self.ctx
            .refresh_token_store()
            .revoke(&token_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        self.store_refresh_token(user.id, &pair.refresh_token).await?;

        Ok(TokenResponse::from(pair))
    }

    /// Log out: revoke one refresh token, or all of the user's tokens when
    /// none is provided.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(
        &self,
        user_id: Snowflake,
        refresh_token: Option<&str>,
    ) -> ServiceResult<()> {
        match refresh_token {
            Some(token) => {
                let token_id = Self::token_id(token);
                self.ctx
                    .refresh_token_store()
                    .revoke(&token_id)
                    .await
                    .map_err(|e| ServiceError::internal(e.to_string()))?;
                info!(user_id = %user_id, "Refresh token revoked");
            }
            None => {
                let count = self
                    .ctx
                    .refresh_token_store()
                    .revoke_all_for_user(user_id)
                    .await
                    .map_err(|e| ServiceError::internal(e.to_string()))?;
                info!(user_id = %user_id, count = count, "All sessions revoked");
            }
        }
        Ok(())
    }

    /// Validate an access token and load the authenticated user
    #[instrument(skip(self, access_token))]
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_access_token(access_token)?;
        let user_id = claims.user_id()?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Issue a token pair and record the refresh token
    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        self.store_refresh_token(user.id, &pair.refresh_token).await?;
        Ok(AuthResponse::new(pair, UserResponse::from(user)))
    }

    async fn store_refresh_token(&self, user_id: Snowflake, token: &str) -> ServiceResult<()> {
        let token_id = Self::token_id(token);
        let data = RefreshTokenData::new(user_id);
        self.ctx
            .refresh_token_store()
            .store(&token_id, &data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))
    }

    /// Derive a stable store key from the token string.
    ///
    /// The JWT signature segment is unique per token and shorter than the
    /// whole token, so it serves as the Redis key.
    fn token_id(token: &str) -> String {
        token
            .rsplit('.')
            .next()
            .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_uses_signature_segment() {
        let id = AuthService::token_id("header.payload.signature");
        assert_eq!(id, "signature");
    }

    #[test]
    fn test_token_id_stable() {
        let token = "aaa.bbb.ccc";
        assert_eq!(AuthService::token_id(token), AuthService::token_id(token));
    }
}

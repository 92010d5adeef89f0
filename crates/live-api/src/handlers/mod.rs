//! Route handlers
//!
//! All HTTP request handlers organized by domain.

use live_core::{DomainError, Snowflake, User};

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod maintenance;
pub mod sessions;
pub mod showcase;
pub mod users;
pub mod viewers;

/// Load the full user record for an authenticated caller.
///
/// Several operations need the caller's role, not just their ID.
pub(crate) async fn load_user(state: &AppState, user_id: Snowflake) -> ApiResult<User> {
    state
        .service_context()
        .user_repo()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Domain(DomainError::UserNotFound(user_id)))
}

/// Parse a Snowflake carried in a request body field
pub(crate) fn parse_id(value: &str, field: &str) -> Result<Snowflake, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::invalid_query(format!("Invalid {field} format")))
}

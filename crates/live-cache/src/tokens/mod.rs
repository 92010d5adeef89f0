//! Token storage module.
//!
//! Redis-backed refresh token storage for authentication sessions.

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};

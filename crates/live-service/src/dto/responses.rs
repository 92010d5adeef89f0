//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings to avoid JavaScript precision
//! loss on 64-bit integers.

use chrono::{DateTime, Utc};
use live_common::auth::{RoomRole, TokenPair};
use serde::Serialize;

// ============================================================================
// Generic Wrappers
// ============================================================================

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Cursor pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Build a paginated response from a page of items.
    ///
    /// `has_more` is derived from whether the page is full; `before` is set
    /// to the last item's cursor so the client can fetch the next page.
    pub fn new(data: Vec<T>, limit: i64, cursor_of_last: Option<String>) -> Self {
        let has_more = data.len() as i64 >= limit;
        Self {
            data,
            pagination: PaginationMeta {
                before: cursor_of_last,
                after: None,
                has_more,
                limit,
            },
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens and user info
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(pair: TokenPair, user: UserResponse) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user,
        }
    }
}

/// Token refresh response (no user payload)
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user representation
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current user representation (includes private fields)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Session Responses
// ============================================================================

/// Full session representation with metrics
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub influencer_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub room_code: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<DateTime<Utc>>,
    pub current_viewers: i32,
    pub peak_viewers: i32,
    pub total_unique_viewers: i32,
    pub total_messages: i32,
    pub total_reactions: i32,
    pub total_shares: i32,
    pub products_showcased: i32,
    pub total_product_clicks: i32,
    pub total_orders: i32,
    pub total_revenue_cents: i64,
    pub conversion_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_watch_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Viewer Responses
// ============================================================================

/// Viewer representation with engagement counters
#[derive(Debug, Clone, Serialize)]
pub struct ViewerResponse {
    pub id: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub viewer_type: String,
    pub joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_at: Option<DateTime<Utc>>,
    pub watch_seconds: i32,
    pub messages_sent: i32,
    pub reactions_sent: i32,
    pub product_clicks: i32,
    pub orders_placed: i32,
    pub connection_quality: String,
}

/// Join response: the viewer row plus the session's live counters
#[derive(Debug, Clone, Serialize)]
pub struct JoinSessionResponse {
    pub viewer: ViewerResponse,
    pub current_viewers: i32,
    pub peak_viewers: i32,
}

// ============================================================================
// Chat Responses
// ============================================================================

/// Chat message representation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub session_id: String,
    pub viewer_id: String,
    pub content: String,
    pub kind: String,
    pub is_flagged: bool,
    pub reaction_count: i32,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Showcase Responses
// ============================================================================

/// Showcased product representation with funnel counters
#[derive(Debug, Clone, Serialize)]
pub struct ShowcaseResponse {
    pub id: String,
    pub session_id: String,
    pub product_id: String,
    pub display_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_cap: Option<i32>,
    pub quantity_sold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i32>,
    pub is_sold_out: bool,
    pub view_count: i32,
    pub click_count: i32,
    pub cart_count: i32,
    pub order_count: i32,
    pub revenue_cents: i64,
    pub conversion_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Order placement result
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub showcase: ShowcaseResponse,
    pub quantity: i32,
    pub revenue_cents: i64,
}

// ============================================================================
// Goal Responses
// ============================================================================

/// Influencer goal representation
#[derive(Debug, Clone, Serialize)]
pub struct GoalResponse {
    pub id: String,
    pub influencer_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_value: i64,
    pub current_value: i64,
    pub progress_percent: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Achievement Responses
// ============================================================================

/// Achievement representation
#[derive(Debug, Clone, Serialize)]
pub struct AchievementResponse {
    pub id: String,
    pub influencer_id: String,
    pub title: String,
    pub category: String,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<i64>,
    pub earned_at: DateTime<Utc>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Aggregated dashboard summary for an influencer
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummaryResponse {
    pub influencer_id: String,
    pub session_count: i64,
    pub total_unique_viewers: i64,
    pub total_messages: i64,
    pub total_product_clicks: i64,
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    pub avg_peak_viewers: f64,
    pub conversion_rate: f64,
    pub goals: Vec<GoalResponse>,
    pub achievements: Vec<AchievementResponse>,
    pub total_achievement_points: i64,
}

// ============================================================================
// Room Token Responses
// ============================================================================

/// Signed media-room token
#[derive(Debug, Clone, Serialize)]
pub struct RoomTokenResponse {
    pub token: String,
    pub room: String,
    pub role: RoomRole,
    pub expires_in: i64,
}

// ============================================================================
// Maintenance Responses
// ============================================================================

/// Result of an expiry sweep over stale scheduled sessions
#[derive(Debug, Clone, Serialize)]
pub struct ExpireSessionsResponse {
    pub expired: u64,
    pub cutoff: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true, true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(true, false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.redis, "unhealthy");
    }

    #[test]
    fn test_paginated_response_has_more() {
        let full = PaginatedResponse::new(vec![1, 2, 3], 3, Some("3".to_string()));
        assert!(full.pagination.has_more);

        let partial = PaginatedResponse::new(vec![1], 3, Some("1".to_string()));
        assert!(!partial.pagination.has_more);
    }
}

//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 64, message = "Display name must be 2-64 characters"))]
    pub display_name: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    /// Account role: customer (default), influencer, or wholesaler
    pub role: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 64, message = "Display name must be 2-64 characters"))]
    pub display_name: Option<String>,

    /// Avatar URL or null to remove
    pub avatar: Option<String>,
}

// ============================================================================
// Session Requests
// ============================================================================

/// Create session request (schedule or instant-create)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// When the broadcast is planned to start; omit for instant sessions
    pub scheduled_start: Option<DateTime<Utc>>,
}

/// Update session details request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub scheduled_start: Option<DateTime<Utc>>,
}

/// Session listing filters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListSessionsRequest {
    /// Filter by influencer (Snowflake as string)
    pub influencer_id: Option<String>,
    /// Filter by status (scheduled/live/paused/ended/cancelled/error)
    pub status: Option<String>,
}

// ============================================================================
// Viewer Requests
// ============================================================================

/// Join session request
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JoinSessionRequest {
    /// Viewer type override; authenticated users default to their role,
    /// unauthenticated joins are anonymous
    pub viewer_type: Option<String>,
}

/// Connection quality report
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionQualityRequest {
    /// good / degraded / poor
    pub quality: String,
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Create chat message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    /// Viewer row issued at join time (Snowflake as string)
    pub viewer_id: String,

    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub content: String,

    /// Message kind: chat (default) or reaction
    pub kind: Option<String>,
}

/// Add a reaction to a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReactionRequest {
    /// Viewer row issued at join time (Snowflake as string)
    pub viewer_id: String,
}

// ============================================================================
// Showcase Requests
// ============================================================================

/// Add a product to a session's showcase
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShowcaseRequest {
    /// Catalog product ID (Snowflake as string)
    pub product_id: String,

    /// Position in the showcase carousel
    #[serde(default)]
    pub display_order: i32,

    /// Live-only price override in cents
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub live_price_cents: Option<i64>,

    /// Live-only discount percent
    #[validate(range(min = 0, max = 100, message = "Discount must be 0-100"))]
    pub discount_percent: Option<i32>,

    /// Limited-quantity cap for the live offer
    #[validate(range(min = 1, message = "Quantity cap must be positive"))]
    pub quantity_cap: Option<i32>,
}

/// Update showcase entry request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateShowcaseRequest {
    pub display_order: Option<i32>,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub live_price_cents: Option<i64>,

    #[validate(range(min = 0, max = 100, message = "Discount must be 0-100"))]
    pub discount_percent: Option<i32>,

    #[validate(range(min = 1, message = "Quantity cap must be positive"))]
    pub quantity_cap: Option<i32>,
}

/// Record a detail-page click from a viewer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordClickRequest {
    /// Viewer row issued at join time (Snowflake as string)
    pub viewer_id: String,
}

/// Place an order against a showcased product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    /// Viewer row issued at join time (Snowflake as string)
    pub viewer_id: String,

    #[validate(range(min = 1, max = 1000, message = "Quantity must be 1-1000"))]
    pub quantity: i32,

    /// Unit price override in cents; defaults to the live price
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub unit_price_cents: Option<i64>,
}

// ============================================================================
// Goal Requests
// ============================================================================

/// Create goal request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Target must be positive"))]
    pub target_value: i64,

    pub due_date: Option<DateTime<Utc>>,
}

/// Update goal request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Target must be positive"))]
    pub target_value: Option<i64>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Set goal progress request. Progress alone never changes the status;
/// a status change must be carried explicitly.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetGoalProgressRequest {
    #[validate(range(min = 0, message = "Progress must not be negative"))]
    pub current_value: i64,

    /// Explicit status change (active/in_progress/completed/paused)
    pub status: Option<String>,
}

// ============================================================================
// Achievement Requests
// ============================================================================

/// Award an achievement (admin/system)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AwardAchievementRequest {
    /// Influencer receiving the award (Snowflake as string)
    pub influencer_id: String,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// sales / audience / engagement / special
    pub category: String,

    #[validate(range(min = 0, message = "Points must not be negative"))]
    pub points: i32,

    pub target_value: Option<i64>,
}

// ============================================================================
// Room Token Requests
// ============================================================================

/// Room token request; the role is derived from the caller (host for the
/// session owner, viewer otherwise), no override accepted.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RoomTokenRequest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "host@example.com".to_string(),
            display_name: "Host".to_string(),
            password: "password123".to_string(),
            role: Some("influencer".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            display_name: "Host".to_string(),
            password: "password123".to_string(),
            role: None,
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_order_quantity_validation() {
        let zero = PlaceOrderRequest {
            viewer_id: "1".to_string(),
            quantity: 0,
            unit_price_cents: None,
        };
        assert!(zero.validate().is_err());

        let ok = PlaceOrderRequest {
            viewer_id: "1".to_string(),
            quantity: 2,
            unit_price_cents: Some(1500),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_goal_target_validation() {
        let zero_target = CreateGoalRequest {
            title: "Sell out".to_string(),
            description: None,
            target_value: 0,
            due_date: None,
        };
        assert!(zero_target.validate().is_err());
    }
}

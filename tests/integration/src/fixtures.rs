//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub role: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@example.com"),
            display_name: format!("Test User {suffix}"),
            password: "TestPass123!".to_string(),
            role: None,
        }
    }

    /// A registration that can host live sessions
    pub fn influencer() -> Self {
        let mut req = Self::unique();
        req.role = Some("influencer".to_string());
        req
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Public user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Token pair response (refresh endpoint)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Sessions
// ============================================================================

/// Create session request
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_start: Option<DateTime<Utc>>,
}

impl CreateSessionRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Flash Sale {suffix}"),
            description: Some("Limited time offers".to_string()),
            scheduled_start: None,
        }
    }
}

/// Session response
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub influencer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub room_code: String,
    pub status: String,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
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
    pub duration_seconds: Option<i64>,
    pub avg_watch_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Room token response
#[derive(Debug, Deserialize)]
pub struct RoomTokenResponse {
    pub token: String,
    pub room: String,
    pub role: String,
    pub expires_in: i64,
}

// ============================================================================
// Viewers
// ============================================================================

/// Join session request
#[derive(Debug, Serialize, Default)]
pub struct JoinSessionRequest {
    pub viewer_type: Option<String>,
}

/// Viewer response
#[derive(Debug, Deserialize)]
pub struct ViewerResponse {
    pub id: String,
    pub session_id: String,
    pub user_id: Option<String>,
    pub viewer_type: String,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    pub watch_seconds: i32,
    pub messages_sent: i32,
    pub reactions_sent: i32,
    pub product_clicks: i32,
    pub orders_placed: i32,
    pub connection_quality: String,
}

/// Join session response
#[derive(Debug, Deserialize)]
pub struct JoinSessionResponse {
    pub viewer: ViewerResponse,
    pub current_viewers: i32,
    pub peak_viewers: i32,
}

// ============================================================================
// Chat
// ============================================================================

/// Create message request
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    pub viewer_id: String,
    pub content: String,
    pub kind: Option<String>,
}

impl CreateMessageRequest {
    pub fn chat(viewer_id: &str, content: &str) -> Self {
        Self {
            viewer_id: viewer_id.to_string(),
            content: content.to_string(),
            kind: None,
        }
    }
}

/// Message response
#[derive(Debug, Deserialize)]
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
// Showcase
// ============================================================================

/// Create showcase request
#[derive(Debug, Serialize)]
pub struct CreateShowcaseRequest {
    pub product_id: String,
    pub display_order: i32,
    pub live_price_cents: Option<i64>,
    pub discount_percent: Option<i32>,
    pub quantity_cap: Option<i32>,
}

impl CreateShowcaseRequest {
    pub fn priced(product_id: &str, price_cents: i64) -> Self {
        Self {
            product_id: product_id.to_string(),
            display_order: 0,
            live_price_cents: Some(price_cents),
            discount_percent: None,
            quantity_cap: None,
        }
    }

    pub fn capped(product_id: &str, price_cents: i64, cap: i32) -> Self {
        Self {
            quantity_cap: Some(cap),
            ..Self::priced(product_id, price_cents)
        }
    }
}

/// Showcase response
#[derive(Debug, Deserialize)]
pub struct ShowcaseResponse {
    pub id: String,
    pub session_id: String,
    pub product_id: String,
    pub display_order: i32,
    pub live_price_cents: Option<i64>,
    pub discount_percent: Option<i32>,
    pub quantity_cap: Option<i32>,
    pub quantity_sold: i32,
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

/// Place order request
#[derive(Debug, Serialize)]
pub struct PlaceOrderRequest {
    pub viewer_id: String,
    pub quantity: i32,
    pub unit_price_cents: Option<i64>,
}

/// Order response
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub showcase: ShowcaseResponse,
    pub quantity: i32,
    pub revenue_cents: i64,
}

// ============================================================================
// Goals
// ============================================================================

/// Create goal request
#[derive(Debug, Serialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub description: Option<String>,
    pub target_value: i64,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateGoalRequest {
    pub fn unique(target: i64) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Goal {suffix}"),
            description: None,
            target_value: target,
            due_date: None,
        }
    }
}

/// Set goal progress request
#[derive(Debug, Serialize)]
pub struct SetGoalProgressRequest {
    pub current_value: i64,
    pub status: Option<String>,
}

/// Goal response
#[derive(Debug, Deserialize)]
pub struct GoalResponse {
    pub id: String,
    pub influencer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i64,
    pub current_value: i64,
    pub progress_percent: f64,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

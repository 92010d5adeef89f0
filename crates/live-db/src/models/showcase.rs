//! Showcase product database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for showcase_products table
#[derive(Debug, Clone, FromRow)]
pub struct ShowcaseModel {
    pub id: i64,
    pub session_id: i64,
    pub product_id: i64,
    pub display_order: i32,
    pub live_price_cents: Option<i64>,
    pub discount_percent: Option<i32>,
    pub quantity_cap: Option<i32>,
    pub quantity_sold: i32,
    pub view_count: i32,
    pub click_count: i32,
    pub cart_count: i32,
    pub order_count: i32,
    pub revenue_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Live session entity <-> model mapper

use live_core::entities::{LiveSession, SessionStatus};
use live_core::traits::SessionTotals;
use live_core::value_objects::{RoomCode, Snowflake};

use crate::models::{SessionModel, SessionTotalsRow};

impl From<SessionModel> for LiveSession {
    fn from(model: SessionModel) -> Self {
        LiveSession {
            id: Snowflake::new(model.id),
            influencer_id: Snowflake::new(model.influencer_id),
            title: model.title,
            description: model.description,
            room_code: RoomCode::from_stored(model.room_code),
            status: SessionStatus::from(model.status.as_str()),
            scheduled_start: model.scheduled_start,
            actual_start: model.actual_start,
            actual_end: model.actual_end,
            current_viewers: model.current_viewers,
            peak_viewers: model.peak_viewers,
            total_unique_viewers: model.total_unique_viewers,
            total_messages: model.total_messages,
            total_reactions: model.total_reactions,
            total_shares: model.total_shares,
            products_showcased: model.products_showcased,
            total_product_clicks: model.total_product_clicks,
            total_orders: model.total_orders,
            total_revenue_cents: model.total_revenue_cents,
            avg_watch_seconds: model.avg_watch_seconds,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SessionTotalsRow> for SessionTotals {
    fn from(row: SessionTotalsRow) -> Self {
        SessionTotals {
            session_count: row.session_count,
            total_unique_viewers: row.total_unique_viewers,
            total_messages: row.total_messages,
            total_product_clicks: row.total_product_clicks,
            total_orders: row.total_orders,
            total_revenue_cents: row.total_revenue_cents,
            avg_peak_viewers: row.avg_peak_viewers,
        }
    }
}

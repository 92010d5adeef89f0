//! Viewer entity <-> model mapper

use live_core::entities::{ConnectionQuality, Viewer, ViewerType};
use live_core::value_objects::Snowflake;

use crate::models::ViewerModel;

impl From<ViewerModel> for Viewer {
    fn from(model: ViewerModel) -> Self {
        Viewer {
            id: Snowflake::new(model.id),
            session_id: Snowflake::new(model.session_id),
            user_id: model.user_id.map(Snowflake::new),
            viewer_type: ViewerType::from(model.viewer_type.as_str()),
            joined_at: model.joined_at,
            left_at: model.left_at,
            watch_seconds: model.watch_seconds,
            messages_sent: model.messages_sent,
            reactions_sent: model.reactions_sent,
            product_clicks: model.product_clicks,
            orders_placed: model.orders_placed,
            connection_quality: ConnectionQuality::from(model.connection_quality.as_str()),
        }
    }
}

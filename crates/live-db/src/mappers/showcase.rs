//! Showcase product entity <-> model mapper

use live_core::entities::ShowcaseProduct;
use live_core::value_objects::Snowflake;

use crate::models::ShowcaseModel;

impl From<ShowcaseModel> for ShowcaseProduct {
    fn from(model: ShowcaseModel) -> Self {
        ShowcaseProduct {
            id: Snowflake::new(model.id),
            session_id: Snowflake::new(model.session_id),
            product_id: Snowflake::new(model.product_id),
            display_order: model.display_order,
            live_price_cents: model.live_price_cents,
            discount_percent: model.discount_percent,
            quantity_cap: model.quantity_cap,
            quantity_sold: model.quantity_sold,
            view_count: model.view_count,
            click_count: model.click_count,
            cart_count: model.cart_count,
            order_count: model.order_count,
            revenue_cents: model.revenue_cents,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

//! Product showcase service
//!
//! Products featured in a session, their live pricing, the engagement funnel
//! (view, click, cart, order), and limited-quantity drops.

use tracing::{info, instrument, warn};

use live_core::entities::ShowcaseProduct;
use live_core::events::{DomainEvent, OrderPlacedEvent, ProductHighlightedEvent};
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::parse_snowflake;
use crate::dto::requests::{CreateShowcaseRequest, PlaceOrderRequest, UpdateShowcaseRequest};
use crate::dto::responses::{OrderResponse, ShowcaseResponse};

/// Product showcase service
pub struct ShowcaseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShowcaseService<'a> {
    /// Create a new showcase service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Feature a product in a session's showcase. Host only.
    #[instrument(skip(self, request), fields(session_id = %session_id))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        session_id: Snowflake,
        request: CreateShowcaseRequest,
    ) -> ServiceResult<ShowcaseResponse> {
        let session = self.load_owned_session(session_id, user_id).await?;

        if session.status.is_terminal() {
            return Err(ServiceError::conflict("Session is over"));
        }

        let product_id = parse_snowflake(&request.product_id)?;
        let mut product = ShowcaseProduct::new(
            self.ctx.generate_id(),
            session_id,
            product_id,
            request.display_order,
        );
        product.live_price_cents = request.live_price_cents;
        product.discount_percent = request.discount_percent;
        product.quantity_cap = request.quantity_cap;

        // The store bumps the session's showcased-products counter in the
        // same transaction as the insert
        self.ctx.showcase_repo().create(&product).await?;

        self.publish(DomainEvent::ProductHighlighted(ProductHighlightedEvent::new(
            product.id, session_id, product_id,
        )))
        .await;

        info!(
            session_id = %session_id,
            showcase_id = %product.id,
            product_id = %product_id,
            "Product showcased"
        );

        Ok(ShowcaseResponse::from(&product))
    }

    /// List a session's showcase, in display order
    #[instrument(skip(self))]
    pub async fn list(&self, session_id: Snowflake) -> ServiceResult<Vec<ShowcaseResponse>> {
        let products = self.ctx.showcase_repo().find_by_session(session_id).await?;
        Ok(products.iter().map(ShowcaseResponse::from).collect())
    }

    /// Get a showcase entry by ID
    #[instrument(skip(self))]
    pub async fn get(&self, showcase_id: Snowflake) -> ServiceResult<ShowcaseResponse> {
        let product = self.load(showcase_id).await?;
        Ok(ShowcaseResponse::from(&product))
    }

    /// Update pricing/ordering on a showcase entry. Host only.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        showcase_id: Snowflake,
        request: UpdateShowcaseRequest,
    ) -> ServiceResult<ShowcaseResponse> {
        let mut product = self.load(showcase_id).await?;
        self.load_owned_session(product.session_id, user_id).await?;

        if let Some(display_order) = request.display_order {
            product.display_order = display_order;
        }
        if let Some(price) = request.live_price_cents {
            product.live_price_cents = Some(price);
        }
        if let Some(discount) = request.discount_percent {
            product.discount_percent = Some(discount);
        }
        if let Some(cap) = request.quantity_cap {
            if cap < product.quantity_sold {
                return Err(ServiceError::validation(
                    "Quantity cap cannot be below units already sold",
                ));
            }
            product.quantity_cap = Some(cap);
        }
        product.updated_at = chrono::Utc::now();

        self.ctx.showcase_repo().update(&product).await?;

        Ok(ShowcaseResponse::from(&product))
    }

    /// Record an impression of a showcased product
    #[instrument(skip(self))]
    pub async fn record_view(&self, showcase_id: Snowflake) -> ServiceResult<()> {
        self.ctx.showcase_repo().record_view(showcase_id).await?;
        Ok(())
    }

    /// Record a click-through on a showcased product
    #[instrument(skip(self))]
    pub async fn record_click(
        &self,
        showcase_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<()> {
        let product = self.load(showcase_id).await?;

        self.ctx.showcase_repo().record_click(showcase_id).await?;
        self.ctx
            .session_repo()
            .record_product_click(product.session_id)
            .await?;
        self.ctx.viewer_repo().record_product_click(viewer_id).await?;

        Ok(())
    }

    /// Record an add-to-cart on a showcased product
    #[instrument(skip(self))]
    pub async fn record_cart(&self, showcase_id: Snowflake) -> ServiceResult<()> {
        self.ctx.showcase_repo().record_cart(showcase_id).await?;
        Ok(())
    }

    /// Place an order against a showcased product.
    ///
    /// The whole order is rejected when it would exceed the quantity cap;
    /// there are no partial fills. Revenue rolls up into the showcase entry,
    /// the session, and the ordering viewer in one transaction at the store,
    /// so a failed order never moves any of the three.
    #[instrument(skip(self, request), fields(showcase_id = %showcase_id, viewer_id = %viewer_id))]
    pub async fn place_order(
        &self,
        viewer_id: Snowflake,
        showcase_id: Snowflake,
        request: PlaceOrderRequest,
    ) -> ServiceResult<OrderResponse> {
        let product = self.load(showcase_id).await?;

        let viewer = self
            .ctx
            .viewer_repo()
            .find_by_id(viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Viewer", viewer_id.to_string()))?;
        if viewer.session_id != product.session_id {
            return Err(ServiceError::validation("Viewer belongs to another session"));
        }

        let unit_price_cents = request
            .unit_price_cents
            .or(product.live_price_cents)
            .ok_or_else(|| ServiceError::validation("No price available for this product"))?;

        let updated = self
            .ctx
            .showcase_repo()
            .record_order(showcase_id, viewer_id, request.quantity, unit_price_cents)
            .await?;

        let revenue_cents = i64::from(request.quantity) * unit_price_cents;

        self.publish(DomainEvent::OrderPlaced(OrderPlacedEvent {
            showcase_id,
            session_id: product.session_id,
            viewer_id,
            quantity: request.quantity,
            revenue_cents,
            timestamp: chrono::Utc::now(),
        }))
        .await;

        info!(
            showcase_id = %showcase_id,
            quantity = request.quantity,
            revenue_cents = revenue_cents,
            "Order placed"
        );

        Ok(OrderResponse {
            showcase: ShowcaseResponse::from(&updated),
            quantity: request.quantity,
            revenue_cents,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load(&self, showcase_id: Snowflake) -> ServiceResult<ShowcaseProduct> {
        self.ctx
            .showcase_repo()
            .find_by_id(showcase_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Showcase entry", showcase_id.to_string()))
    }

    async fn load_owned_session(
        &self,
        session_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<live_core::entities::LiveSession> {
        let session = self
            .ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id.to_string()))?;
        if !session.is_owner(user_id) {
            return Err(ServiceError::permission_denied("manage this showcase"));
        }
        Ok(session)
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

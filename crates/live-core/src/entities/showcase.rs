//! ShowcaseProduct entity - a product featured in a live session

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// ShowcaseProduct entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseProduct {
    pub id: Snowflake,
    pub session_id: Snowflake,
    /// Catalog product being featured
    pub product_id: Snowflake,
    pub display_order: i32,
    /// Stream-only price override, in cents
    pub live_price_cents: Option<i64>,
    pub discount_percent: Option<i32>,
    /// Limited-quantity drop cap; `None` means unlimited
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

impl ShowcaseProduct {
    /// Create a new showcase entry
    #[must_use]
    pub fn new(id: Snowflake, session_id: Snowflake, product_id: Snowflake, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            session_id,
            product_id,
            display_order,
            live_price_cents: None,
            discount_percent: None,
            quantity_cap: None,
            quantity_sold: 0,
            view_count: 0,
            click_count: 0,
            cart_count: 0,
            order_count: 0,
            revenue_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Units still available, if a cap is set
    #[must_use]
    pub fn remaining(&self) -> Option<i32> {
        self.quantity_cap.map(|cap| (cap - self.quantity_sold).max(0))
    }

    /// Check if the limited-quantity cap is exhausted
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        matches!(self.remaining(), Some(0))
    }

    /// Record an impression
    pub fn record_view(&mut self) {
        self.view_count += 1;
        self.updated_at = Utc::now();
    }

    /// Record a click-through
    pub fn record_click(&mut self) {
        self.click_count += 1;
        self.updated_at = Utc::now();
    }

    /// Record an add-to-cart
    pub fn record_cart(&mut self) {
        self.cart_count += 1;
        self.updated_at = Utc::now();
    }

    /// Record an order of `quantity` units at `unit_price_cents` each.
    ///
    /// Rejects the whole order when it would exceed the quantity cap; partial
    /// fills are not offered.
    pub fn record_order(&mut self, quantity: i32, unit_price_cents: i64) -> Result<(), DomainError> {
        if let Some(remaining) = self.remaining() {
            if quantity > remaining {
                return Err(DomainError::ShowcaseSoldOut);
            }
        }
        self.quantity_sold += quantity;
        self.order_count += 1;
        self.revenue_cents += i64::from(quantity) * unit_price_cents;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Effective unit price for orders: live override when set
    #[must_use]
    pub fn effective_price_cents(&self, catalog_price_cents: i64) -> i64 {
        self.live_price_cents.unwrap_or(catalog_price_cents)
    }

    /// Click-to-order conversion rate; exactly 0.0 when there are no clicks
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        if self.click_count > 0 {
            f64::from(self.order_count) / f64::from(self.click_count)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ShowcaseProduct {
        ShowcaseProduct::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(500), 0)
    }

    #[test]
    fn test_unlimited_product_never_sells_out() {
        let mut p = product();
        assert!(p.remaining().is_none());
        assert!(!p.is_sold_out());

        p.record_order(1_000_000, 100).unwrap();
        assert!(!p.is_sold_out());
    }

    #[test]
    fn test_quantity_cap_enforced() {
        let mut p = product();
        p.quantity_cap = Some(5);

        p.record_order(3, 1000).unwrap();
        assert_eq!(p.remaining(), Some(2));

        // Order exceeding the remaining stock is rejected whole
        let err = p.record_order(3, 1000).unwrap_err();
        assert!(matches!(err, DomainError::ShowcaseSoldOut));
        assert_eq!(p.quantity_sold, 3);

        p.record_order(2, 1000).unwrap();
        assert!(p.is_sold_out());
        assert!(p.record_order(1, 1000).is_err());
    }

    #[test]
    fn test_order_revenue_accumulates() {
        let mut p = product();
        p.record_order(2, 1500).unwrap();
        p.record_order(1, 2000).unwrap();
        assert_eq!(p.order_count, 2);
        assert_eq!(p.revenue_cents, 5000);
    }

    #[test]
    fn test_effective_price_prefers_live_override() {
        let mut p = product();
        assert_eq!(p.effective_price_cents(4999), 4999);

        p.live_price_cents = Some(3999);
        assert_eq!(p.effective_price_cents(4999), 3999);
    }

    #[test]
    fn test_conversion_rate() {
        let mut p = product();
        assert_eq!(p.conversion_rate(), 0.0);

        p.record_click();
        p.record_click();
        p.record_order(1, 1000).unwrap();
        assert!((p.conversion_rate() - 0.5).abs() < f64::EPSILON);
    }
}

//! PostgreSQL implementation of ShowcaseRepository
//!
//! Order recording enforces the quantity cap inside the UPDATE predicate,
//! so two concurrent orders can never jointly oversell a capped product.
//! The session and viewer rollups for an order commit in the same
//! transaction as the showcase update, never one without the others.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::ShowcaseProduct;
use live_core::error::DomainError;
use live_core::traits::{RepoResult, ShowcaseRepository};
use live_core::value_objects::Snowflake;

use crate::models::ShowcaseModel;

use super::error::{map_db_error, session_not_found, showcase_not_found, viewer_not_found};

const SHOWCASE_COLUMNS: &str = "id, session_id, product_id, display_order, live_price_cents, \
     discount_percent, quantity_cap, quantity_sold, view_count, click_count, cart_count, \
     order_count, revenue_cents, created_at, updated_at";

/// PostgreSQL implementation of ShowcaseRepository
#[derive(Clone)]
pub struct PgShowcaseRepository {
    pool: PgPool,
}

impl PgShowcaseRepository {
    /// Create a new PgShowcaseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn increment(&self, id: Snowflake, set_clause: &str) -> RepoResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE showcase_products SET {set_clause}, updated_at = NOW() WHERE id = $1",
        ))
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(showcase_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ShowcaseRepository for PgShowcaseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ShowcaseProduct>> {
        let result = sqlx::query_as::<_, ShowcaseModel>(&format!(
            "SELECT {SHOWCASE_COLUMNS} FROM showcase_products WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ShowcaseProduct::from))
    }

    #[instrument(skip(self))]
    async fn find_by_session(&self, session_id: Snowflake) -> RepoResult<Vec<ShowcaseProduct>> {
        let results = sqlx::query_as::<_, ShowcaseModel>(&format!(
            r#"
            SELECT {SHOWCASE_COLUMNS} FROM showcase_products
            WHERE session_id = $1
            ORDER BY display_order ASC, id ASC
            "#,
        ))
        .bind(session_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ShowcaseProduct::from).collect())
    }

    #[instrument(skip(self, product))]
    async fn create(&self, product: &ShowcaseProduct) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO showcase_products
                (id, session_id, product_id, display_order, live_price_cents,
                 discount_percent, quantity_cap, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.into_inner())
        .bind(product.session_id.into_inner())
        .bind(product.product_id.into_inner())
        .bind(product.display_order)
        .bind(product.live_price_cents)
        .bind(product.discount_percent)
        .bind(product.quantity_cap)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // The session's showcased-products counter moves with the insert
        let bumped = sqlx::query(
            "UPDATE live_sessions \
             SET products_showcased = products_showcased + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(product.session_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if bumped.rows_affected() == 0 {
            return Err(session_not_found(product.session_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, product))]
    async fn update(&self, product: &ShowcaseProduct) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE showcase_products
            SET display_order = $2, live_price_cents = $3, discount_percent = $4,
                quantity_cap = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(product.id.into_inner())
        .bind(product.display_order)
        .bind(product.live_price_cents)
        .bind(product.discount_percent)
        .bind(product.quantity_cap)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(showcase_not_found(product.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "view_count = view_count + 1").await
    }

    #[instrument(skip(self))]
    async fn record_click(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "click_count = click_count + 1").await
    }

    #[instrument(skip(self))]
    async fn record_cart(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "cart_count = cart_count + 1").await
    }

    #[instrument(skip(self))]
    async fn record_order(
        &self,
        id: Snowflake,
        viewer_id: Snowflake,
        quantity: i32,
        unit_price_cents: i64,
    ) -> RepoResult<ShowcaseProduct> {
        let revenue_cents = unit_price_cents * i64::from(quantity);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The cap check lives in the WHERE clause: a whole order that would
        // exceed the remaining quantity matches no row and leaves counters
        // untouched
        let result = sqlx::query_as::<_, ShowcaseModel>(&format!(
            r#"
            UPDATE showcase_products
            SET quantity_sold = quantity_sold + $2,
                order_count = order_count + 1,
                revenue_cents = revenue_cents + $3,
                updated_at = NOW()
            WHERE id = $1
              AND (quantity_cap IS NULL OR quantity_cap - quantity_sold >= $2)
            RETURNING {SHOWCASE_COLUMNS}
            "#,
        ))
        .bind(id.into_inner())
        .bind(quantity)
        .bind(revenue_cents)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM showcase_products WHERE id = $1)")
                    .bind(id.into_inner())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_db_error)?;

            return if exists.0 {
                Err(DomainError::ShowcaseSoldOut)
            } else {
                Err(showcase_not_found(id))
            };
        };

        // Session and viewer rollups ride the same transaction, so a failure
        // here rolls the sale back instead of stranding the showcase counters
        let session = sqlx::query(
            r#"
            UPDATE live_sessions
            SET total_orders = total_orders + 1,
                total_revenue_cents = total_revenue_cents + $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(model.session_id)
        .bind(revenue_cents)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if session.rows_affected() == 0 {
            return Err(session_not_found(Snowflake::new(model.session_id)));
        }

        let viewer =
            sqlx::query("UPDATE session_viewers SET orders_placed = orders_placed + 1 WHERE id = $1")
                .bind(viewer_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if viewer.rows_affected() == 0 {
            return Err(viewer_not_found(viewer_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(ShowcaseProduct::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgShowcaseRepository>();
    }
}

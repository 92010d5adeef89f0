//! PostgreSQL implementation of ViewerRepository
//!
//! A viewer row is append-then-close: `mark_left` is the only write that
//! touches `left_at`, and it refuses rows that are already closed so a
//! double leave surfaces as `ViewerAlreadyLeft` instead of rewriting the
//! frozen watch duration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::{ConnectionQuality, Viewer};
use live_core::error::DomainError;
use live_core::traits::{CursorQuery, RepoResult, ViewerRepository};
use live_core::value_objects::Snowflake;

use crate::models::ViewerModel;

use super::error::{map_db_error, viewer_not_found};

const VIEWER_COLUMNS: &str = "id, session_id, user_id, viewer_type, joined_at, left_at, \
     watch_seconds, messages_sent, reactions_sent, product_clicks, orders_placed, \
     connection_quality";

/// PostgreSQL implementation of ViewerRepository
#[derive(Clone)]
pub struct PgViewerRepository {
    pool: PgPool,
}

impl PgViewerRepository {
    /// Create a new PgViewerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn increment(&self, id: Snowflake, set_clause: &str) -> RepoResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE session_viewers SET {set_clause} WHERE id = $1",
        ))
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(viewer_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ViewerRepository for PgViewerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Viewer>> {
        let result = sqlx::query_as::<_, ViewerModel>(&format!(
            "SELECT {VIEWER_COLUMNS} FROM session_viewers WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Viewer::from))
    }

    #[instrument(skip(self))]
    async fn find_active_by_user(
        &self,
        session_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Viewer>> {
        let result = sqlx::query_as::<_, ViewerModel>(&format!(
            r#"
            SELECT {VIEWER_COLUMNS} FROM session_viewers
            WHERE session_id = $1 AND user_id = $2 AND left_at IS NULL
            ORDER BY id DESC
            LIMIT 1
            "#,
        ))
        .bind(session_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Viewer::from))
    }

    #[instrument(skip(self))]
    async fn has_joined_before(
        &self,
        session_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM session_viewers WHERE session_id = $1 AND user_id = $2)",
        )
        .bind(session_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists.0)
    }

    #[instrument(skip(self))]
    async fn find_by_session(
        &self,
        session_id: Snowflake,
        query: CursorQuery,
    ) -> RepoResult<Vec<Viewer>> {
        let limit = query.limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ViewerModel>(&format!(
            r#"
            SELECT {VIEWER_COLUMNS} FROM session_viewers
            WHERE session_id = $1 AND id < $2
            ORDER BY id DESC
            LIMIT $3
            "#,
        ))
        .bind(session_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner).unwrap_or(i64::MAX))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Viewer::from).collect())
    }

    #[instrument(skip(self, viewer))]
    async fn create(&self, viewer: &Viewer) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO session_viewers
                (id, session_id, user_id, viewer_type, joined_at, connection_quality)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(viewer.id.into_inner())
        .bind(viewer.session_id.into_inner())
        .bind(viewer.user_id.map(Snowflake::into_inner))
        .bind(viewer.viewer_type.as_str())
        .bind(viewer.joined_at)
        .bind(viewer.connection_quality.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_left(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<Viewer> {
        // Only open rows match; a closed row keeps its frozen duration
        let result = sqlx::query_as::<_, ViewerModel>(&format!(
            r#"
            UPDATE session_viewers
            SET left_at = $2,
                watch_seconds = GREATEST(EXTRACT(EPOCH FROM ($2 - joined_at))::INT, 0)
            WHERE id = $1 AND left_at IS NULL
            RETURNING {VIEWER_COLUMNS}
            "#,
        ))
        .bind(id.into_inner())
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(Viewer::from(model)),
            None => {
                // Distinguish a closed row from a missing one
                let exists: (bool,) =
                    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM session_viewers WHERE id = $1)")
                        .bind(id.into_inner())
                        .fetch_one(&self.pool)
                        .await
                        .map_err(map_db_error)?;

                if exists.0 {
                    Err(DomainError::ViewerAlreadyLeft)
                } else {
                    Err(viewer_not_found(id))
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn record_message(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "messages_sent = messages_sent + 1").await
    }

    #[instrument(skip(self))]
    async fn record_reaction(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "reactions_sent = reactions_sent + 1").await
    }

    #[instrument(skip(self))]
    async fn record_product_click(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "product_clicks = product_clicks + 1").await
    }

    #[instrument(skip(self))]
    async fn set_connection_quality(
        &self,
        id: Snowflake,
        quality: ConnectionQuality,
    ) -> RepoResult<()> {
        let result = sqlx::query("UPDATE session_viewers SET connection_quality = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(quality.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(viewer_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgViewerRepository>();
    }
}

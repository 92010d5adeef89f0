//! PostgreSQL implementation of SessionRepository
//!
//! All counter mutations are single in-place UPDATE statements so concurrent
//! join/leave/engagement events serialize on the session row instead of
//! racing through read-modify-write cycles. Ending a session is one
//! transaction covering the status flip, the open-viewer sweep, and the
//! average-watch-time snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::LiveSession;
use live_core::traits::{RepoResult, SessionQuery, SessionRepository, SessionTotals};
use live_core::value_objects::{RoomCode, Snowflake};

use crate::models::{SessionModel, SessionTotalsRow};

use super::error::{map_db_error, session_not_found};

const SESSION_COLUMNS: &str = "id, influencer_id, title, description, room_code, status, \
     scheduled_start, actual_start, actual_end, \
     current_viewers, peak_viewers, total_unique_viewers, \
     total_messages, total_reactions, total_shares, \
     products_showcased, total_product_clicks, total_orders, total_revenue_cents, \
     avg_watch_seconds, created_at, updated_at";

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a counter increment that returns the updated session row
    async fn increment_returning(&self, id: Snowflake, set_clause: &str) -> RepoResult<LiveSession> {
        let result = sqlx::query_as::<_, SessionModel>(&format!(
            "UPDATE live_sessions SET {set_clause}, updated_at = NOW() \
             WHERE id = $1 RETURNING {SESSION_COLUMNS}",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(LiveSession::from).ok_or_else(|| session_not_found(id))
    }

    /// Run a counter increment where the caller does not need the row back
    async fn increment(&self, id: Snowflake, set_clause: &str) -> RepoResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE live_sessions SET {set_clause}, updated_at = NOW() WHERE id = $1",
        ))
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LiveSession>> {
        let result = sqlx::query_as::<_, SessionModel>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LiveSession::from))
    }

    #[instrument(skip(self))]
    async fn find_by_room_code(&self, code: &RoomCode) -> RepoResult<Option<LiveSession>> {
        let result = sqlx::query_as::<_, SessionModel>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE room_code = $1",
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LiveSession::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: SessionQuery) -> RepoResult<Vec<LiveSession>> {
        let limit = query.cursor.limit.clamp(1, 100);

        // Optional filters collapse to always-true predicates when unset
        let results = sqlx::query_as::<_, SessionModel>(&format!(
            r#"
            SELECT {SESSION_COLUMNS} FROM live_sessions
            WHERE ($1 = 0 OR influencer_id = $1)
              AND ($2 = '' OR status = $2)
              AND id < $3
            ORDER BY id DESC
            LIMIT $4
            "#,
        ))
        .bind(query.influencer_id.map(Snowflake::into_inner).unwrap_or(0))
        .bind(query.status.map_or("", |s| s.as_str()))
        .bind(
            query
                .cursor
                .before
                .map(Snowflake::into_inner)
                .unwrap_or(i64::MAX),
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LiveSession::from).collect())
    }

    #[instrument(skip(self, session))]
    async fn create(&self, session: &LiveSession) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO live_sessions
                (id, influencer_id, title, description, room_code, status,
                 scheduled_start, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.id.into_inner())
        .bind(session.influencer_id.into_inner())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.room_code.as_str())
        .bind(session.status.as_str())
        .bind(session.scheduled_start)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn update_details(&self, session: &LiveSession) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE live_sessions
            SET title = $2, description = $3, scheduled_start = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(session.id.into_inner())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.scheduled_start)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(session.id));
        }
        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn update_status(&self, session: &LiveSession) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE live_sessions
            SET status = $2, actual_start = $3, actual_end = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(session.id.into_inner())
        .bind(session.status.as_str())
        .bind(session.actual_start)
        .bind(session.actual_end)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(session.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn end_session(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<LiveSession> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Flip the status; the row lock serializes against counter updates
        let updated = sqlx::query(
            r#"
            UPDATE live_sessions
            SET status = 'ended', actual_end = $2, current_viewers = 0, updated_at = NOW()
            WHERE id = $1 AND status IN ('live', 'paused')
            "#,
        )
        .bind(id.into_inner())
        .bind(ended_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(session_not_found(id));
        }

        // Viewers who never left are truncated at the actual end time
        sqlx::query(
            r#"
            UPDATE session_viewers
            SET left_at = $2,
                watch_seconds = GREATEST(EXTRACT(EPOCH FROM ($2 - joined_at))::INT, 0)
            WHERE session_id = $1 AND left_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .bind(ended_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Snapshot average watch time now that every duration is closed
        let model = sqlx::query_as::<_, SessionModel>(&format!(
            r#"
            UPDATE live_sessions
            SET avg_watch_seconds = (
                SELECT AVG(watch_seconds)::INT
                FROM session_viewers
                WHERE session_id = $1
            )
            WHERE id = $1
            RETURNING {SESSION_COLUMNS}
            "#,
        ))
        .bind(id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LiveSession::from(model))
    }

    #[instrument(skip(self))]
    async fn expire_scheduled_before(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE live_sessions
            SET status = 'cancelled', updated_at = NOW()
            WHERE status = 'scheduled' AND scheduled_start IS NOT NULL AND scheduled_start < $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn record_viewer_joined(&self, id: Snowflake, first_time: bool) -> RepoResult<LiveSession> {
        let result = sqlx::query_as::<_, SessionModel>(&format!(
            r#"
            UPDATE live_sessions
            SET current_viewers = current_viewers + 1,
                peak_viewers = GREATEST(peak_viewers, current_viewers + 1),
                total_unique_viewers = total_unique_viewers + CASE WHEN $2 THEN 1 ELSE 0 END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SESSION_COLUMNS}
            "#,
        ))
        .bind(id.into_inner())
        .bind(first_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(LiveSession::from).ok_or_else(|| session_not_found(id))
    }

    #[instrument(skip(self))]
    async fn record_viewer_left(&self, id: Snowflake) -> RepoResult<LiveSession> {
        // Floored at zero: a stray double-leave never drives the count negative
        self.increment_returning(id, "current_viewers = GREATEST(current_viewers - 1, 0)")
            .await
    }

    #[instrument(skip(self))]
    async fn record_message(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "total_messages = total_messages + 1").await
    }

    #[instrument(skip(self))]
    async fn record_reaction(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "total_reactions = total_reactions + 1").await
    }

    #[instrument(skip(self))]
    async fn record_share(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "total_shares = total_shares + 1").await
    }

    #[instrument(skip(self))]
    async fn record_product_click(&self, id: Snowflake) -> RepoResult<()> {
        self.increment(id, "total_product_clicks = total_product_clicks + 1")
            .await
    }

    #[instrument(skip(self))]
    async fn totals_for_influencer(&self, influencer_id: Snowflake) -> RepoResult<SessionTotals> {
        // SUM over every session row, never a capped page
        let row = sqlx::query_as::<_, SessionTotalsRow>(
            r#"
            SELECT COUNT(*)::BIGINT AS session_count,
                   COALESCE(SUM(total_unique_viewers), 0)::BIGINT AS total_unique_viewers,
                   COALESCE(SUM(total_messages), 0)::BIGINT AS total_messages,
                   COALESCE(SUM(total_product_clicks), 0)::BIGINT AS total_product_clicks,
                   COALESCE(SUM(total_orders), 0)::BIGINT AS total_orders,
                   COALESCE(SUM(total_revenue_cents), 0)::BIGINT AS total_revenue_cents,
                   COALESCE(AVG(peak_viewers), 0)::DOUBLE PRECISION AS avg_peak_viewers
            FROM live_sessions
            WHERE influencer_id = $1
            "#,
        )
        .bind(influencer_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(SessionTotals::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSessionRepository>();
    }
}

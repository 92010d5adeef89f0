//! PostgreSQL implementation of ChatMessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::ChatMessage;
use live_core::traits::{ChatMessageRepository, CursorQuery, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::ChatMessageModel;

use super::error::{map_db_error, message_not_found};

const MESSAGE_COLUMNS: &str = "id, session_id, viewer_id, content, kind, is_deleted, is_flagged, \
     reaction_count, created_at";

/// PostgreSQL implementation of ChatMessageRepository
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: PgPool,
}

impl PgChatMessageRepository {
    /// Create a new PgChatMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ChatMessage>> {
        let result = sqlx::query_as::<_, ChatMessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatMessage::from))
    }

    #[instrument(skip(self))]
    async fn find_by_session(
        &self,
        session_id: Snowflake,
        query: CursorQuery,
    ) -> RepoResult<Vec<ChatMessage>> {
        let limit = query.limit.clamp(1, 100);

        // Soft-deleted messages never come back in listings
        let results = match (query.before, query.after) {
            (Some(before), _) => {
                sqlx::query_as::<_, ChatMessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM chat_messages
                    WHERE session_id = $1 AND is_deleted = FALSE AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                ))
                .bind(session_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                sqlx::query_as::<_, ChatMessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM chat_messages
                    WHERE session_id = $1 AND is_deleted = FALSE AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    "#,
                ))
                .bind(session_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query_as::<_, ChatMessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM chat_messages
                    WHERE session_id = $1 AND is_deleted = FALSE
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                ))
                .bind(session_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatMessage::from).collect())
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &ChatMessage) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, session_id, viewer_id, content, kind, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.session_id.into_inner())
        .bind(message.viewer_id.into_inner())
        .bind(&message.content)
        .bind(message.kind.as_str())
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE chat_messages SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn flag(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE chat_messages SET is_flagged = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_reaction(&self, id: Snowflake) -> RepoResult<i32> {
        let result: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE chat_messages
            SET reaction_count = reaction_count + 1
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING reaction_count
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(|(count,)| count).ok_or_else(|| message_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChatMessageRepository>();
    }
}

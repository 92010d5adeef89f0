//! PostgreSQL implementation of GoalRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::{GoalStatus, InfluencerGoal};
use live_core::traits::{GoalRepository, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::GoalModel;

use super::error::{goal_not_found, map_db_error};

const GOAL_COLUMNS: &str = "id, influencer_id, title, description, target_value, current_value, \
     status, due_date, created_at, updated_at";

/// PostgreSQL implementation of GoalRepository
#[derive(Clone)]
pub struct PgGoalRepository {
    pool: PgPool,
}

impl PgGoalRepository {
    /// Create a new PgGoalRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalRepository for PgGoalRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<InfluencerGoal>> {
        let result = sqlx::query_as::<_, GoalModel>(&format!(
            "SELECT {GOAL_COLUMNS} FROM influencer_goals WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InfluencerGoal::from))
    }

    #[instrument(skip(self))]
    async fn find_by_influencer(&self, influencer_id: Snowflake) -> RepoResult<Vec<InfluencerGoal>> {
        let results = sqlx::query_as::<_, GoalModel>(&format!(
            "SELECT {GOAL_COLUMNS} FROM influencer_goals WHERE influencer_id = $1 ORDER BY id DESC",
        ))
        .bind(influencer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(InfluencerGoal::from).collect())
    }

    #[instrument(skip(self, goal))]
    async fn create(&self, goal: &InfluencerGoal) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO influencer_goals
                (id, influencer_id, title, description, target_value, current_value,
                 status, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(goal.id.into_inner())
        .bind(goal.influencer_id.into_inner())
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(goal.status.as_str())
        .bind(goal.due_date)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, goal))]
    async fn update(&self, goal: &InfluencerGoal) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE influencer_goals
            SET title = $2, description = $3, target_value = $4, due_date = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(goal.id.into_inner())
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.target_value)
        .bind(goal.due_date)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(goal_not_found(goal.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_progress(&self, id: Snowflake, current_value: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE influencer_goals SET current_value = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(current_value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(goal_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: Snowflake, status: GoalStatus) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE influencer_goals SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(goal_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM influencer_goals WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(goal_not_found(id));
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
        assert_send_sync::<PgGoalRepository>();
    }
}

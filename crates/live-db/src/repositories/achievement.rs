//! PostgreSQL implementation of AchievementRepository
//!
//! Achievements are written once and never updated or deleted.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::Achievement;
use live_core::traits::{AchievementRepository, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::AchievementModel;

use super::error::map_db_error;

const ACHIEVEMENT_COLUMNS: &str =
    "id, influencer_id, title, category, points, target_value, earned_at";

/// PostgreSQL implementation of AchievementRepository
#[derive(Clone)]
pub struct PgAchievementRepository {
    pool: PgPool,
}

impl PgAchievementRepository {
    /// Create a new PgAchievementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementRepository for PgAchievementRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Achievement>> {
        let result = sqlx::query_as::<_, AchievementModel>(&format!(
            "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Achievement::from))
    }

    #[instrument(skip(self))]
    async fn find_by_influencer(&self, influencer_id: Snowflake) -> RepoResult<Vec<Achievement>> {
        let results = sqlx::query_as::<_, AchievementModel>(&format!(
            r#"
            SELECT {ACHIEVEMENT_COLUMNS} FROM achievements
            WHERE influencer_id = $1
            ORDER BY earned_at DESC
            "#,
        ))
        .bind(influencer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Achievement::from).collect())
    }

    #[instrument(skip(self, achievement))]
    async fn create(&self, achievement: &Achievement) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO achievements
                (id, influencer_id, title, category, points, target_value, earned_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(achievement.id.into_inner())
        .bind(achievement.influencer_id.into_inner())
        .bind(&achievement.title)
        .bind(achievement.category.as_str())
        .bind(achievement.points)
        .bind(achievement.target_value)
        .bind(achievement.earned_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAchievementRepository>();
    }
}

//! Influencer dashboard service
//!
//! Aggregates an influencer's session totals, goals, and achievements into
//! one summary. Totals are computed by the store over ALL sessions, never
//! from a page of results.

use tracing::{info, instrument, warn};

use live_core::entities::{Achievement, AchievementCategory, User};
use live_core::events::{AchievementEarnedEvent, DomainEvent};
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::parse_snowflake;
use crate::dto::requests::AwardAchievementRequest;
use crate::dto::responses::{AchievementResponse, DashboardSummaryResponse, GoalResponse};

/// Influencer dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the dashboard summary for an influencer
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        influencer_id: Snowflake,
    ) -> ServiceResult<DashboardSummaryResponse> {
        let totals = self
            .ctx
            .session_repo()
            .totals_for_influencer(influencer_id)
            .await?;
        let goals = self.ctx.goal_repo().find_by_influencer(influencer_id).await?;
        let achievements = self
            .ctx
            .achievement_repo()
            .find_by_influencer(influencer_id)
            .await?;

        let total_achievement_points = achievements
            .iter()
            .map(|a| i64::from(a.points))
            .sum::<i64>();

        Ok(DashboardSummaryResponse {
            influencer_id: influencer_id.to_string(),
            session_count: totals.session_count,
            total_unique_viewers: totals.total_unique_viewers,
            total_messages: totals.total_messages,
            total_product_clicks: totals.total_product_clicks,
            total_orders: totals.total_orders,
            total_revenue_cents: totals.total_revenue_cents,
            avg_peak_viewers: totals.avg_peak_viewers,
            conversion_rate: totals.conversion_rate(),
            goals: goals.iter().map(GoalResponse::from).collect(),
            achievements: achievements.iter().map(AchievementResponse::from).collect(),
            total_achievement_points,
        })
    }

    /// List an influencer's achievements, newest first
    #[instrument(skip(self))]
    pub async fn list_achievements(
        &self,
        influencer_id: Snowflake,
    ) -> ServiceResult<Vec<AchievementResponse>> {
        let achievements = self
            .ctx
            .achievement_repo()
            .find_by_influencer(influencer_id)
            .await?;
        Ok(achievements.iter().map(AchievementResponse::from).collect())
    }

    /// Award an achievement. Admin only; awards are immutable once created.
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn award_achievement(
        &self,
        actor: &User,
        request: AwardAchievementRequest,
    ) -> ServiceResult<AchievementResponse> {
        if !actor.is_admin() {
            return Err(ServiceError::permission_denied("award achievements"));
        }

        let influencer_id = parse_snowflake(&request.influencer_id)?;
        let influencer = self
            .ctx
            .user_repo()
            .find_by_id(influencer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", influencer_id.to_string()))?;

        if !influencer.role.can_host() {
            return Err(ServiceError::validation(
                "Achievements can only be awarded to hosting accounts",
            ));
        }

        let category = parse_category(&request.category)?;
        let mut achievement = Achievement::new(
            self.ctx.generate_id(),
            influencer_id,
            request.title,
            category,
            request.points,
        );
        achievement.target_value = request.target_value;

        self.ctx.achievement_repo().create(&achievement).await?;

        self.publish(DomainEvent::AchievementEarned(AchievementEarnedEvent {
            achievement_id: achievement.id,
            influencer_id,
            timestamp: chrono::Utc::now(),
        }))
        .await;

        info!(
            achievement_id = %achievement.id,
            influencer_id = %influencer_id,
            points = achievement.points,
            "Achievement awarded"
        );

        Ok(AchievementResponse::from(&achievement))
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

/// Parse an achievement category, rejecting unknown values
fn parse_category(value: &str) -> ServiceResult<AchievementCategory> {
    match value {
        "sales" | "audience" | "engagement" | "special" => Ok(AchievementCategory::from(value)),
        other => Err(ServiceError::validation(format!(
            "Unknown achievement category: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("sales").unwrap(), AchievementCategory::Sales);
        assert!(parse_category("legendary").is_err());
    }
}

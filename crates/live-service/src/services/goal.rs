//! Influencer goal service
//!
//! Goals are owner-managed targets. Progress updates never change the
//! status; completion is always an explicit owner action.

use tracing::{info, instrument, warn};

use live_core::entities::{GoalStatus, InfluencerGoal};
use live_core::events::{DomainEvent, GoalProgressUpdatedEvent};
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::{CreateGoalRequest, SetGoalProgressRequest, UpdateGoalRequest};
use crate::dto::responses::GoalResponse;

/// Influencer goal service
pub struct GoalService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a goal for the calling influencer
    #[instrument(skip(self, request), fields(influencer_id = %influencer_id))]
    pub async fn create(
        &self,
        influencer_id: Snowflake,
        request: CreateGoalRequest,
    ) -> ServiceResult<GoalResponse> {
        let mut goal = InfluencerGoal::new(
            self.ctx.generate_id(),
            influencer_id,
            request.title,
            request.target_value,
        )?;
        goal.description = request.description;
        goal.due_date = request.due_date;

        self.ctx.goal_repo().create(&goal).await?;

        info!(goal_id = %goal.id, target = goal.target_value, "Goal created");

        Ok(GoalResponse::from(&goal))
    }

    /// Get a goal by ID
    #[instrument(skip(self))]
    pub async fn get(&self, goal_id: Snowflake) -> ServiceResult<GoalResponse> {
        let goal = self.load(goal_id).await?;
        Ok(GoalResponse::from(&goal))
    }

    /// List an influencer's goals
    #[instrument(skip(self))]
    pub async fn list(&self, influencer_id: Snowflake) -> ServiceResult<Vec<GoalResponse>> {
        let goals = self.ctx.goal_repo().find_by_influencer(influencer_id).await?;
        Ok(goals.iter().map(GoalResponse::from).collect())
    }

    /// Update a goal's details. Owner only.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        goal_id: Snowflake,
        request: UpdateGoalRequest,
    ) -> ServiceResult<GoalResponse> {
        let mut goal = self.load_owned(goal_id, user_id).await?;

        if let Some(title) = request.title {
            goal.title = title;
        }
        if let Some(description) = request.description {
            goal.description = Some(description);
        }
        if let Some(target_value) = request.target_value {
            if target_value <= 0 {
                return Err(ServiceError::validation("Goal target must be positive"));
            }
            goal.target_value = target_value;
        }
        if let Some(due_date) = request.due_date {
            goal.due_date = Some(due_date);
        }
        goal.updated_at = chrono::Utc::now();

        self.ctx.goal_repo().update(&goal).await?;

        Ok(GoalResponse::from(&goal))
    }

    /// Set a goal's progress, and optionally its status. Owner only.
    ///
    /// Crossing the target changes nothing by itself; the status moves only
    /// when the request carries one.
    #[instrument(skip(self, request))]
    pub async fn set_progress(
        &self,
        user_id: Snowflake,
        goal_id: Snowflake,
        request: SetGoalProgressRequest,
    ) -> ServiceResult<GoalResponse> {
        let mut goal = self.load_owned(goal_id, user_id).await?;

        goal.set_progress(request.current_value)?;
        self.ctx
            .goal_repo()
            .set_progress(goal_id, request.current_value)
            .await?;

        if let Some(status) = request.status.as_deref() {
            let status = parse_goal_status(status)?;
            goal.set_status(status);
            self.ctx.goal_repo().set_status(goal_id, status).await?;
        }

        self.publish(DomainEvent::GoalProgressUpdated(GoalProgressUpdatedEvent {
            goal_id,
            influencer_id: goal.influencer_id,
            current_value: goal.current_value,
            target_value: goal.target_value,
            timestamp: chrono::Utc::now(),
        }))
        .await;

        Ok(GoalResponse::from(&goal))
    }

    /// Delete a goal. Owner only.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, goal_id: Snowflake) -> ServiceResult<()> {
        self.load_owned(goal_id, user_id).await?;
        self.ctx.goal_repo().delete(goal_id).await?;

        info!(goal_id = %goal_id, "Goal deleted");
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load(&self, goal_id: Snowflake) -> ServiceResult<InfluencerGoal> {
        self.ctx
            .goal_repo()
            .find_by_id(goal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Goal", goal_id.to_string()))
    }

    async fn load_owned(
        &self,
        goal_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<InfluencerGoal> {
        let goal = self.load(goal_id).await?;
        if !goal.is_owner(user_id) {
            return Err(ServiceError::permission_denied("manage this goal"));
        }
        Ok(goal)
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

/// Parse a goal status, rejecting unknown values
fn parse_goal_status(value: &str) -> ServiceResult<GoalStatus> {
    match value {
        "active" | "in_progress" | "completed" | "paused" => Ok(GoalStatus::from(value)),
        other => Err(ServiceError::validation(format!(
            "Unknown goal status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goal_status() {
        assert_eq!(parse_goal_status("completed").unwrap(), GoalStatus::Completed);
        assert_eq!(parse_goal_status("in_progress").unwrap(), GoalStatus::InProgress);
        assert!(parse_goal_status("done").is_err());
    }
}

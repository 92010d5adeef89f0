//! Influencer goal entity <-> model mapper

use live_core::entities::{GoalStatus, InfluencerGoal};
use live_core::value_objects::Snowflake;

use crate::models::GoalModel;

impl From<GoalModel> for InfluencerGoal {
    fn from(model: GoalModel) -> Self {
        InfluencerGoal {
            id: Snowflake::new(model.id),
            influencer_id: Snowflake::new(model.influencer_id),
            title: model.title,
            description: model.description,
            target_value: model.target_value,
            current_value: model.current_value,
            status: GoalStatus::from(model.status.as_str()),
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

//! Achievement entity <-> model mapper

use live_core::entities::{Achievement, AchievementCategory};
use live_core::value_objects::Snowflake;

use crate::models::AchievementModel;

impl From<AchievementModel> for Achievement {
    fn from(model: AchievementModel) -> Self {
        Achievement {
            id: Snowflake::new(model.id),
            influencer_id: Snowflake::new(model.influencer_id),
            title: model.title,
            category: AchievementCategory::from(model.category.as_str()),
            points: model.points,
            target_value: model.target_value,
            earned_at: model.earned_at,
        }
    }
}

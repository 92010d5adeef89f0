//! Achievement entity - a badge earned by an influencer
//!
//! Achievements are immutable once awarded: no setters, no deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Category an achievement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Revenue and order milestones
    Sales,
    /// Viewer count milestones
    Audience,
    /// Chat/reaction milestones
    #[default]
    Engagement,
    /// One-off platform awards
    Special,
}

impl AchievementCategory {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Audience => "audience",
            Self::Engagement => "engagement",
            Self::Special => "special",
        }
    }
}

impl From<&str> for AchievementCategory {
    fn from(value: &str) -> Self {
        match value {
            "sales" => Self::Sales,
            "audience" => Self::Audience,
            "special" => Self::Special,
            _ => Self::Engagement,
        }
    }
}

/// Achievement entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: Snowflake,
    pub influencer_id: Snowflake,
    pub title: String,
    pub category: AchievementCategory,
    pub points: i32,
    /// Numeric threshold the award was earned at, when applicable
    pub target_value: Option<i64>,
    pub earned_at: DateTime<Utc>,
}

impl Achievement {
    /// Award a new achievement, earned now
    #[must_use]
    pub fn new(
        id: Snowflake,
        influencer_id: Snowflake,
        title: String,
        category: AchievementCategory,
        points: i32,
    ) -> Self {
        Self {
            id,
            influencer_id,
            title,
            category,
            points,
            target_value: None,
            earned_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_award() {
        let a = Achievement::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "First 1k viewers".to_string(),
            AchievementCategory::Audience,
            50,
        );
        assert_eq!(a.category, AchievementCategory::Audience);
        assert_eq!(a.points, 50);
        assert!(a.target_value.is_none());
    }

    #[test]
    fn test_category_string_roundtrip() {
        for cat in [
            AchievementCategory::Sales,
            AchievementCategory::Audience,
            AchievementCategory::Engagement,
            AchievementCategory::Special,
        ] {
            assert_eq!(AchievementCategory::from(cat.as_str()), cat);
        }
    }
}

//! InfluencerGoal entity - self-set target an influencer tracks over time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Status of a goal, controlled explicitly by its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    InProgress,
    Completed,
    Paused,
}

impl GoalStatus {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl From<&str> for GoalStatus {
    fn from(value: &str) -> Self {
        match value {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            _ => Self::Active,
        }
    }
}

/// InfluencerGoal entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluencerGoal {
    pub id: Snowflake,
    pub influencer_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i64,
    pub current_value: i64,
    pub status: GoalStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InfluencerGoal {
    /// Create a new goal, validating the target
    pub fn new(
        id: Snowflake,
        influencer_id: Snowflake,
        title: String,
        target_value: i64,
    ) -> Result<Self, DomainError> {
        if target_value <= 0 {
            return Err(DomainError::ValidationError(
                "goal target must be positive".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            influencer_id,
            title,
            description: None,
            target_value,
            current_value: 0,
            status: GoalStatus::Active,
            due_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if a user owns the goal
    #[inline]
    #[must_use]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.influencer_id == user_id
    }

    /// Progress percentage clamped to [0, 100]; exactly 0.0 at zero progress.
    ///
    /// Reaching or exceeding the target does NOT change `status`; completion
    /// is an explicit owner action.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.current_value <= 0 || self.target_value <= 0 {
            return 0.0;
        }
        let pct = 100.0 * self.current_value as f64 / self.target_value as f64;
        pct.min(100.0)
    }

    /// Set the current progress value; status is untouched
    pub fn set_progress(&mut self, current_value: i64) -> Result<(), DomainError> {
        if current_value < 0 {
            return Err(DomainError::ValidationError(
                "goal progress cannot be negative".to_string(),
            ));
        }
        self.current_value = current_value;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Explicitly set the goal status
    pub fn set_status(&mut self, status: GoalStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Check if the goal is past its due date
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| now > due) && self.status != GoalStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn goal(target: i64) -> InfluencerGoal {
        InfluencerGoal::new(Snowflake::new(1), Snowflake::new(100), "10k revenue".to_string(), target)
            .unwrap()
    }

    #[test]
    fn test_non_positive_target_rejected() {
        assert!(InfluencerGoal::new(Snowflake::new(1), Snowflake::new(1), "g".to_string(), 0).is_err());
        assert!(InfluencerGoal::new(Snowflake::new(1), Snowflake::new(1), "g".to_string(), -5).is_err());
    }

    #[test]
    fn test_progress_zero_when_current_zero() {
        let g = goal(1000);
        assert_eq!(g.progress_percent(), 0.0);
    }

    #[test]
    fn test_progress_clamped_to_hundred() {
        let mut g = goal(100);
        g.set_progress(250).unwrap();
        assert_eq!(g.progress_percent(), 100.0);
    }

    #[test]
    fn test_progress_midway() {
        let mut g = goal(200);
        g.set_progress(50).unwrap();
        assert!((g.progress_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reaching_target_does_not_complete() {
        let mut g = goal(100);
        g.set_progress(100).unwrap();
        assert_eq!(g.progress_percent(), 100.0);
        // Status only changes through an explicit call
        assert_eq!(g.status, GoalStatus::Active);

        g.set_status(GoalStatus::Completed);
        assert_eq!(g.status, GoalStatus::Completed);
    }

    #[test]
    fn test_negative_progress_rejected() {
        let mut g = goal(100);
        assert!(g.set_progress(-1).is_err());
    }

    #[test]
    fn test_overdue() {
        let mut g = goal(100);
        let now = Utc::now();
        assert!(!g.is_overdue(now));

        g.due_date = Some(now - Duration::days(1));
        assert!(g.is_overdue(now));

        g.set_status(GoalStatus::Completed);
        assert!(!g.is_overdue(now));
    }
}

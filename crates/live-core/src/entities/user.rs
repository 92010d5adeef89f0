//! User entity - registered account on the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Platform role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Shopper who watches streams and places orders
    #[default]
    Customer,
    /// Creator who hosts live sessions
    Influencer,
    /// Supplier whose products are showcased
    Wholesaler,
    /// Platform operator
    Admin,
}

impl UserRole {
    /// String representation (matches database storage)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Influencer => "influencer",
            Self::Wholesaler => "wholesaler",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may host live sessions
    #[inline]
    #[must_use]
    pub fn can_host(self) -> bool {
        matches!(self, Self::Influencer | Self::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "influencer" => Self::Influencer,
            "wholesaler" => Self::Wholesaler,
            "admin" => Self::Admin,
            _ => Self::Customer, // Default for unknown values
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new User
    #[must_use]
    pub fn new(id: Snowflake, email: String, display_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name,
            role,
            avatar: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check if the account has been soft-deleted
    #[inline]
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the user is a platform admin
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Get the avatar URL if set
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("/avatars/{}/{}.png", self.id, hash))
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }

    /// Soft-delete the account
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            Snowflake::new(1),
            "host@example.com".to_string(),
            "Host".to_string(),
            UserRole::Influencer,
        );
        assert_eq!(user.role, UserRole::Influencer);
        assert!(!user.is_deleted());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_can_host() {
        assert!(UserRole::Influencer.can_host());
        assert!(UserRole::Admin.can_host());
        assert!(!UserRole::Customer.can_host());
        assert!(!UserRole::Wholesaler.can_host());
    }

    #[test]
    fn test_role_string_roundtrip() {
        for role in [
            UserRole::Customer,
            UserRole::Influencer,
            UserRole::Wholesaler,
            UserRole::Admin,
        ] {
            assert_eq!(UserRole::from(role.as_str()), role);
        }
        assert_eq!(UserRole::from("unknown"), UserRole::Customer);
    }

    #[test]
    fn test_soft_delete() {
        let mut user = User::new(
            Snowflake::new(1),
            "a@b.c".to_string(),
            "A".to_string(),
            UserRole::Customer,
        );
        user.mark_deleted();
        assert!(user.is_deleted());
    }
}

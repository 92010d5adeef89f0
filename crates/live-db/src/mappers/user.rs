//! User entity <-> model mapper

use live_core::entities::{User, UserRole};
use live_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            role: UserRole::from(model.role.as_str()),
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

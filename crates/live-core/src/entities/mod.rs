//! Domain entities

mod achievement;
mod chat_message;
mod goal;
mod session;
mod showcase;
mod user;
mod viewer;

pub use achievement::{Achievement, AchievementCategory};
pub use chat_message::{ChatMessage, MessageKind};
pub use goal::{GoalStatus, InfluencerGoal};
pub use session::{LiveSession, SessionStatus};
pub use showcase::ShowcaseProduct;
pub use user::{User, UserRole};
pub use viewer::{ConnectionQuality, Viewer, ViewerType};

//! Database models (SQLx `FromRow` structs)

mod achievement;
mod chat_message;
mod goal;
mod session;
mod showcase;
mod user;
mod viewer;

pub use achievement::AchievementModel;
pub use chat_message::ChatMessageModel;
pub use goal::GoalModel;
pub use session::{SessionModel, SessionTotalsRow};
pub use showcase::ShowcaseModel;
pub use user::UserModel;
pub use viewer::ViewerModel;

//! PostgreSQL repository implementations

mod achievement;
mod chat_message;
mod error;
mod goal;
mod session;
mod showcase;
mod user;
mod viewer;

pub use achievement::PgAchievementRepository;
pub use chat_message::PgChatMessageRepository;
pub use goal::PgGoalRepository;
pub use session::PgSessionRepository;
pub use showcase::PgShowcaseRepository;
pub use user::PgUserRepository;
pub use viewer::PgViewerRepository;

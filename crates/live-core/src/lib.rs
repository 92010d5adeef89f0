//! # live-core
//!
//! Domain layer for the live-commerce streaming backend: entities, value objects,
//! repository traits, and domain events. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Achievement, AchievementCategory, ChatMessage, ConnectionQuality, GoalStatus,
    InfluencerGoal, LiveSession, MessageKind, SessionStatus, ShowcaseProduct, User, UserRole,
    Viewer, ViewerType,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    AchievementRepository, ChatMessageRepository, CursorQuery, GoalRepository, RepoResult,
    SessionQuery, SessionRepository, SessionTotals, ShowcaseRepository, UserRepository,
    ViewerRepository,
};
pub use value_objects::{RoomCode, RoomCodeParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError};

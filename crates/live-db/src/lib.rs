//! # live-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `live-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Counter updates happen in-place (`SET x = x + 1`) so concurrent events
//! never lose increments, and the end-of-session bookkeeping runs in one
//! transaction.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use live_db::pool::{create_pool, DatabaseConfig};
//! use live_db::repositories::PgSessionRepository;
//! use live_core::traits::SessionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let session_repo = PgSessionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAchievementRepository, PgChatMessageRepository, PgGoalRepository, PgSessionRepository,
    PgShowcaseRepository, PgUserRepository, PgViewerRepository,
};

//! # live-cache
//!
//! Redis caching layer for viewer presence, refresh tokens, and pub/sub.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Token Storage**: Refresh tokens with automatic expiration
//! - **Presence**: Live viewer sets per session with heartbeat TTLs
//! - **Pub/Sub**: Change-notification fan-out across server instances
//!
//! ## Example
//!
//! ```ignore
//! use live_cache::{RedisPool, RedisPoolConfig, ViewerPresenceStore, Publisher};
//!
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! let presence = ViewerPresenceStore::new(pool.clone());
//! let publisher = Publisher::new(pool.clone());
//!
//! presence.mark_watching(session_id, viewer_id).await?;
//! publisher.publish_event(&event).await?;
//! ```

pub mod pool;
pub mod presence;
pub mod pubsub;
pub mod tokens;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export token types
pub use tokens::{RefreshTokenData, RefreshTokenStore};

// Re-export presence types
pub use presence::ViewerPresenceStore;

// Re-export pubsub types
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher, BROADCAST_CHANNEL, SESSION_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Counter mutations are expressed as atomic
//! operations here so implementations can perform them in-place at the
//! store instead of read-modify-write at the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Achievement, ChatMessage, ConnectionQuality, GoalStatus, InfluencerGoal, LiveSession,
    SessionStatus, ShowcaseProduct, User, Viewer,
};
use crate::error::DomainError;
use crate::value_objects::{RoomCode, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor pagination options (snowflake-ordered)
#[derive(Debug, Clone, Default)]
pub struct CursorQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Session Repository
// ============================================================================

/// Filter options for session listings
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub influencer_id: Option<Snowflake>,
    pub status: Option<SessionStatus>,
    pub cursor: CursorQuery,
}

/// Aggregate totals across an influencer's sessions, computed by the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTotals {
    pub session_count: i64,
    pub total_unique_viewers: i64,
    pub total_messages: i64,
    pub total_product_clicks: i64,
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    pub avg_peak_viewers: f64,
}

impl SessionTotals {
    /// Overall click-to-order conversion; exactly 0.0 without clicks
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        if self.total_product_clicks > 0 {
            self.total_orders as f64 / self.total_product_clicks as f64
        } else {
            0.0
        }
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find session by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LiveSession>>;

    /// Find session by its media-room share code
    async fn find_by_room_code(&self, code: &RoomCode) -> RepoResult<Option<LiveSession>>;

    /// List sessions matching a filter
    async fn list(&self, query: SessionQuery) -> RepoResult<Vec<LiveSession>>;

    /// Create a new session
    async fn create(&self, session: &LiveSession) -> RepoResult<()>;

    /// Update mutable session details (title/description/scheduled start)
    async fn update_details(&self, session: &LiveSession) -> RepoResult<()>;

    /// Persist a status transition (non-ending ones; see `end_session`)
    async fn update_status(&self, session: &LiveSession) -> RepoResult<()>;

    /// End a session in a single transaction: set status/actual_end, close
    /// every open viewer row at the end time, and snapshot average watch
    /// seconds over all viewers. Returns the finalized session.
    async fn end_session(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<LiveSession>;

    /// Cancel scheduled sessions whose start is older than `cutoff`.
    /// Returns the number of sessions cancelled.
    async fn expire_scheduled_before(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;

    // ------------------------------------------------------------------------
    // Atomic counter updates (in-place at the store)
    // ------------------------------------------------------------------------

    /// A viewer joined: current + 1, unique + 1 when `first_time`, peak
    /// raised to the new current if higher. Returns updated counters.
    async fn record_viewer_joined(&self, id: Snowflake, first_time: bool) -> RepoResult<LiveSession>;

    /// A viewer left: current - 1, floored at zero. Returns updated counters.
    async fn record_viewer_left(&self, id: Snowflake) -> RepoResult<LiveSession>;

    /// Increment the message counter
    async fn record_message(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the reaction counter
    async fn record_reaction(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the share counter
    async fn record_share(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the product click counter
    async fn record_product_click(&self, id: Snowflake) -> RepoResult<()>;

    // ------------------------------------------------------------------------
    // Aggregates
    // ------------------------------------------------------------------------

    /// SUM aggregates over ALL of an influencer's sessions (never a page)
    async fn totals_for_influencer(&self, influencer_id: Snowflake) -> RepoResult<SessionTotals>;
}

// ============================================================================
// Viewer Repository
// ============================================================================

#[async_trait]
pub trait ViewerRepository: Send + Sync {
    /// Find viewer by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Viewer>>;

    /// Find a user's open (not-left) viewer row in a session, if any
    async fn find_active_by_user(
        &self,
        session_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Viewer>>;

    /// Check whether a user has ever had a viewer row in a session
    async fn has_joined_before(&self, session_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// List viewers of a session with pagination
    async fn find_by_session(&self, session_id: Snowflake, query: CursorQuery)
        -> RepoResult<Vec<Viewer>>;

    /// Create a new viewer row
    async fn create(&self, viewer: &Viewer) -> RepoResult<()>;

    /// Stamp `left_at` and freeze watch duration. Fails with
    /// `ViewerAlreadyLeft` when the row is already closed.
    async fn mark_left(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<Viewer>;

    /// Increment the viewer's message counter
    async fn record_message(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the viewer's reaction counter
    async fn record_reaction(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the viewer's product click counter
    async fn record_product_click(&self, id: Snowflake) -> RepoResult<()>;

    /// Update the viewer's reported connection quality
    async fn set_connection_quality(&self, id: Snowflake, quality: ConnectionQuality)
        -> RepoResult<()>;
}

// ============================================================================
// Chat Message Repository
// ============================================================================

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ChatMessage>>;

    /// List messages in a session with pagination (excludes soft-deleted)
    async fn find_by_session(&self, session_id: Snowflake, query: CursorQuery)
        -> RepoResult<Vec<ChatMessage>>;

    /// Create a new message
    async fn create(&self, message: &ChatMessage) -> RepoResult<()>;

    /// Soft delete a message
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Flag a message for moderation
    async fn flag(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment a message's reaction counter atomically
    async fn add_reaction(&self, id: Snowflake) -> RepoResult<i32>;
}

// ============================================================================
// Showcase Repository
// ============================================================================

#[async_trait]
pub trait ShowcaseRepository: Send + Sync {
    /// Find showcase entry by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ShowcaseProduct>>;

    /// List products showcased in a session, ordered by display order
    async fn find_by_session(&self, session_id: Snowflake) -> RepoResult<Vec<ShowcaseProduct>>;

    /// Create a new showcase entry, bumping the owning session's
    /// showcased-products counter in the same transaction
    async fn create(&self, product: &ShowcaseProduct) -> RepoResult<()>;

    /// Update pricing/ordering fields
    async fn update(&self, product: &ShowcaseProduct) -> RepoResult<()>;

    /// Increment the view counter
    async fn record_view(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the click counter
    async fn record_click(&self, id: Snowflake) -> RepoResult<()>;

    /// Increment the add-to-cart counter
    async fn record_cart(&self, id: Snowflake) -> RepoResult<()>;

    /// Record an order of `quantity` units, rejecting with `ShowcaseSoldOut`
    /// when it would exceed the quantity cap. The showcase entry, the owning
    /// session's commercial counters, and the ordering viewer's counter all
    /// move in one transaction. Returns the updated entry.
    async fn record_order(
        &self,
        id: Snowflake,
        viewer_id: Snowflake,
        quantity: i32,
        unit_price_cents: i64,
    ) -> RepoResult<ShowcaseProduct>;
}

// ============================================================================
// Goal Repository
// ============================================================================

#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Find goal by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<InfluencerGoal>>;

    /// List an influencer's goals
    async fn find_by_influencer(&self, influencer_id: Snowflake) -> RepoResult<Vec<InfluencerGoal>>;

    /// Create a new goal
    async fn create(&self, goal: &InfluencerGoal) -> RepoResult<()>;

    /// Update goal details (title/description/target/due date)
    async fn update(&self, goal: &InfluencerGoal) -> RepoResult<()>;

    /// Set the current progress value (status untouched)
    async fn set_progress(&self, id: Snowflake, current_value: i64) -> RepoResult<()>;

    /// Set the goal status explicitly
    async fn set_status(&self, id: Snowflake, status: GoalStatus) -> RepoResult<()>;

    /// Delete a goal
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Achievement Repository
// ============================================================================

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Find achievement by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Achievement>>;

    /// List an influencer's achievements, newest first
    async fn find_by_influencer(&self, influencer_id: Snowflake) -> RepoResult<Vec<Achievement>>;

    /// Award a new achievement (immutable once created)
    async fn create(&self, achievement: &Achievement) -> RepoResult<()>;
}

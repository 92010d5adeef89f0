//! Pub/Sub channel definitions.
//!
//! Defines the channel naming conventions for Redis Pub/Sub.

use live_core::Snowflake;

/// Channel prefix for session events
pub const SESSION_CHANNEL_PREFIX: &str = "session:";
/// Channel prefix for user-specific events
pub const USER_CHANNEL_PREFIX: &str = "user:";
/// Channel for broadcast events (all connected clients)
pub const BROADCAST_CHANNEL: &str = "broadcast";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events for a specific live session (everyone in the room)
    Session(Snowflake),
    /// Events for a specific user (all their devices)
    User(Snowflake),
    /// Broadcast to all connected clients
    Broadcast,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create a session channel
    #[must_use]
    pub fn session(session_id: Snowflake) -> Self {
        Self::Session(session_id)
    }

    /// Create a user channel
    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    /// Create a broadcast channel
    #[must_use]
    pub fn broadcast() -> Self {
        Self::Broadcast
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Session(id) => format!("{SESSION_CHANNEL_PREFIX}{id}"),
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        if let Some(id_str) = name.strip_prefix(SESSION_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Session(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(USER_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::User(Snowflake::from(id));
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let session_id = Snowflake::from(12345i64);
        let user_id = Snowflake::from(11111i64);

        assert_eq!(PubSubChannel::session(session_id).name(), "session:12345");
        assert_eq!(PubSubChannel::user(user_id).name(), "user:11111");
        assert_eq!(PubSubChannel::broadcast().name(), "broadcast");
        assert_eq!(PubSubChannel::custom("test").name(), "test");
    }

    #[test]
    fn test_channel_parse() {
        let session_channel = PubSubChannel::parse("session:12345");
        assert_eq!(
            session_channel,
            PubSubChannel::Session(Snowflake::from(12345i64))
        );

        let user_channel = PubSubChannel::parse("user:11111");
        assert_eq!(user_channel, PubSubChannel::User(Snowflake::from(11111i64)));

        let broadcast = PubSubChannel::parse("broadcast");
        assert_eq!(broadcast, PubSubChannel::Broadcast);

        let custom = PubSubChannel::parse("unknown:123");
        assert_eq!(custom, PubSubChannel::Custom("unknown:123".to_string()));
    }
}

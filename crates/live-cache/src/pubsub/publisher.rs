//! Redis Pub/Sub publisher.
//!
//! Publishes change notifications to Redis channels for distribution to
//! connected clients on every server instance.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use live_core::DomainEvent;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "VIEWER_JOINED", "SESSION_STATUS_CHANGED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a domain event for publishing
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            data: serde_json::to_value(event)?,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a domain event, routed by its session: session-scoped events
    /// go to the session channel, the rest to broadcast.
    pub async fn publish_event(&self, event: &DomainEvent) -> RedisResult<u32> {
        let wrapped = PubSubEvent::from_domain(event)?;
        let channel = match event.session_id() {
            Some(session_id) => PubSubChannel::session(session_id),
            None => PubSubChannel::broadcast(),
        };
        self.publish(&channel, &wrapped).await
    }

    /// Publish a user-specific event
    pub async fn publish_to_user(
        &self,
        user_id: live_core::Snowflake,
        event_type: &str,
        data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(event_type, data);
        let channel = PubSubChannel::user(user_id);
        self.publish(&channel, &event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_core::events::SessionCreatedEvent;
    use live_core::Snowflake;

    #[test]
    fn test_pubsub_event_creation() {
        let data = serde_json::json!({
            "id": "12345",
            "title": "Friday drop"
        });

        let event = PubSubEvent::new("SESSION_CREATED", data.clone());
        assert_eq!(event.event_type, "SESSION_CREATED");
        assert_eq!(event.data, data);
    }

    #[test]
    fn test_event_serialization() {
        let data = serde_json::json!({"title": "test"});
        let event = PubSubEvent::new("TEST_EVENT", data);

        let json = event.to_json().unwrap();
        assert!(json.contains("TEST_EVENT"));
        assert!(json.contains("test"));
    }

    #[test]
    fn test_from_domain_event() {
        let event = DomainEvent::SessionCreated(SessionCreatedEvent::new(
            Snowflake::from(1i64),
            Snowflake::from(2i64),
        ));

        let wrapped = PubSubEvent::from_domain(&event).unwrap();
        assert_eq!(wrapped.event_type, "SESSION_CREATED");
    }
}

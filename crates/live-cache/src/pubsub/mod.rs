//! Pub/Sub module.
//!
//! Publishes change notifications over Redis so every server instance can
//! fan events out to its own connected clients.

mod channels;
mod publisher;

pub use channels::{
    PubSubChannel, BROADCAST_CHANNEL, SESSION_CHANNEL_PREFIX, USER_CHANNEL_PREFIX,
};
pub use publisher::{PubSubEvent, Publisher};

//! Live viewer presence storage in Redis.
//!
//! Each session keeps a set of viewer IDs currently watching, plus one
//! heartbeat key per viewer with a short TTL. A viewer that stops sending
//! heartbeats ages out of the heartbeat key; the set is pruned against the
//! surviving heartbeats, so the database stays the source of truth for
//! historical counters while Redis answers "who is watching right now".

use crate::pool::{RedisPool, RedisResult};
use live_core::Snowflake;
use redis::AsyncCommands;

/// Key prefix for per-session viewer sets
const WATCHING_PREFIX: &str = "watching:";
/// Key prefix for per-viewer heartbeat keys
const HEARTBEAT_PREFIX: &str = "heartbeat:";

/// Heartbeat TTL (90 seconds, refreshed by the client every 30)
const HEARTBEAT_TTL: u64 = 90;
/// Watching-set TTL, refreshed on every join and heartbeat
const WATCHING_TTL: u64 = 6 * 60 * 60;

/// Live viewer presence store
#[derive(Clone)]
pub struct ViewerPresenceStore {
    pool: RedisPool,
}

impl ViewerPresenceStore {
    /// Create a new presence store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a session's watching set
    fn watching_key(session_id: Snowflake) -> String {
        format!("{WATCHING_PREFIX}{session_id}")
    }

    /// Generate Redis key for a viewer's heartbeat
    fn heartbeat_key(session_id: Snowflake, viewer_id: Snowflake) -> String {
        format!("{HEARTBEAT_PREFIX}{session_id}:{viewer_id}")
    }

    /// Mark a viewer as watching a session
    pub async fn mark_watching(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RedisResult<()> {
        let set_key = Self::watching_key(session_id);
        let hb_key = Self::heartbeat_key(session_id, viewer_id);
        let mut conn = self.pool.get().await?;

        conn.sadd::<_, _, ()>(&set_key, viewer_id.to_string()).await?;
        conn.expire::<_, ()>(&set_key, WATCHING_TTL as i64).await?;
        conn.set_ex::<_, _, ()>(&hb_key, 1, HEARTBEAT_TTL).await?;

        tracing::debug!(
            session_id = %session_id,
            viewer_id = %viewer_id,
            "Viewer marked watching"
        );

        Ok(())
    }

    /// Refresh a viewer's heartbeat. Returns false when the viewer is no
    /// longer in the watching set (the caller should treat it as a rejoin).
    pub async fn heartbeat(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RedisResult<bool> {
        let set_key = Self::watching_key(session_id);
        let hb_key = Self::heartbeat_key(session_id, viewer_id);
        let mut conn = self.pool.get().await?;

        let watching: bool = conn.sismember(&set_key, viewer_id.to_string()).await?;
        if !watching {
            return Ok(false);
        }

        conn.set_ex::<_, _, ()>(&hb_key, 1, HEARTBEAT_TTL).await?;
        conn.expire::<_, ()>(&set_key, WATCHING_TTL as i64).await?;
        Ok(true)
    }

    /// Remove a viewer from a session's watching set
    pub async fn mark_left(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RedisResult<bool> {
        let set_key = Self::watching_key(session_id);
        let hb_key = Self::heartbeat_key(session_id, viewer_id);
        let mut conn = self.pool.get().await?;

        let removed: i32 = conn.srem(&set_key, viewer_id.to_string()).await?;
        conn.del::<_, ()>(&hb_key).await?;

        Ok(removed > 0)
    }

    /// Check whether a viewer is currently watching
    pub async fn is_watching(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RedisResult<bool> {
        let set_key = Self::watching_key(session_id);
        let mut conn = self.pool.get().await?;
        let watching: bool = conn.sismember(&set_key, viewer_id.to_string()).await?;
        Ok(watching)
    }

    /// Count viewers currently watching a session
    pub async fn watching_count(&self, session_id: Snowflake) -> RedisResult<u64> {
        let set_key = Self::watching_key(session_id);
        let mut conn = self.pool.get().await?;
        let count: u64 = conn.scard(&set_key).await?;
        Ok(count)
    }

    /// List viewers currently watching a session
    pub async fn watching_viewers(&self, session_id: Snowflake) -> RedisResult<Vec<Snowflake>> {
        let set_key = Self::watching_key(session_id);
        let mut conn = self.pool.get().await?;
        let ids: Vec<String> = conn.smembers(&set_key).await?;

        let mut result = Vec::new();
        for id_str in ids {
            if let Ok(id) = id_str.parse::<i64>() {
                result.push(Snowflake::from(id));
            }
        }
        Ok(result)
    }

    /// Remove set members whose heartbeat has expired. Returns the IDs of
    /// the viewers that were pruned so the caller can close their rows.
    pub async fn prune_stale(&self, session_id: Snowflake) -> RedisResult<Vec<Snowflake>> {
        let set_key = Self::watching_key(session_id);
        let mut conn = self.pool.get().await?;
        let ids: Vec<String> = conn.smembers(&set_key).await?;

        let mut stale = Vec::new();
        for id_str in ids {
            let Ok(id) = id_str.parse::<i64>() else {
                continue;
            };
            let viewer_id = Snowflake::from(id);
            let hb_key = Self::heartbeat_key(session_id, viewer_id);
            let alive: bool = conn.exists(&hb_key).await?;
            if !alive {
                conn.srem::<_, _, ()>(&set_key, &id_str).await?;
                stale.push(viewer_id);
            }
        }

        if !stale.is_empty() {
            tracing::debug!(
                session_id = %session_id,
                pruned = stale.len(),
                "Pruned stale viewers"
            );
        }

        Ok(stale)
    }

    /// Drop a session's entire watching set (called when the session ends)
    pub async fn clear_session(&self, session_id: Snowflake) -> RedisResult<u32> {
        let set_key = Self::watching_key(session_id);
        let mut conn = self.pool.get().await?;

        let ids: Vec<String> = conn.smembers(&set_key).await?;
        let count = ids.len() as u32;

        for id_str in &ids {
            if let Ok(id) = id_str.parse::<i64>() {
                let hb_key = Self::heartbeat_key(session_id, Snowflake::from(id));
                conn.del::<_, ()>(&hb_key).await?;
            }
        }
        conn.del::<_, ()>(&set_key).await?;

        tracing::debug!(
            session_id = %session_id,
            viewers = count,
            "Cleared session presence"
        );

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let session_id = Snowflake::from(12345i64);
        let viewer_id = Snowflake::from(67890i64);

        assert_eq!(
            ViewerPresenceStore::watching_key(session_id),
            format!("watching:{session_id}")
        );
        assert_eq!(
            ViewerPresenceStore::heartbeat_key(session_id, viewer_id),
            format!("heartbeat:{session_id}:{viewer_id}")
        );
    }
}

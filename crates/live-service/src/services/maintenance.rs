//! Maintenance service
//!
//! Housekeeping invoked by operators or a scheduler: expiring stale
//! scheduled sessions in bulk, reaping lapsed viewers, and marking a
//! session as failed after a broadcast fault. Every operation here is
//! admin-gated.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use live_core::entities::User;
use live_core::events::{DomainEvent, SessionStatusChangedEvent};
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::responses::{ExpireSessionsResponse, SessionResponse};

/// Maintenance service
pub struct MaintenanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new maintenance service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cancel scheduled sessions whose start time is older than the grace
    /// period. Admin only. Returns how many sessions were expired.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn expire_stale_sessions(
        &self,
        actor: &User,
        grace: Duration,
    ) -> ServiceResult<ExpireSessionsResponse> {
        if !actor.is_admin() {
            return Err(ServiceError::permission_denied("run maintenance sweeps"));
        }

        let cutoff = Utc::now() - grace;
        let expired = self
            .ctx
            .session_repo()
            .expire_scheduled_before(cutoff)
            .await?;

        info!(
            cutoff = %cutoff,
            expired = expired,
            "Expired stale scheduled sessions"
        );

        Ok(ExpireSessionsResponse { expired, cutoff })
    }

    /// Reap stale viewers for one session: prune silent entries from the
    /// presence set and close their rows. Admin only.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn reap_session_viewers(
        &self,
        actor: &User,
        session_id: Snowflake,
    ) -> ServiceResult<u32> {
        if !actor.is_admin() {
            return Err(ServiceError::permission_denied("run maintenance sweeps"));
        }

        super::viewer::ViewerService::new(self.ctx)
            .reap_stale(session_id)
            .await
    }

    /// Mark a session as failed after a broadcast fault. Admin only.
    ///
    /// `error` is terminal and reachable from any active state.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn mark_session_errored(
        &self,
        actor: &User,
        session_id: Snowflake,
    ) -> ServiceResult<SessionResponse> {
        if !actor.is_admin() {
            return Err(ServiceError::permission_denied("run maintenance sweeps"));
        }

        let mut session = self
            .ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id.to_string()))?;

        let from = session.status;
        session.mark_error()?;
        self.ctx.session_repo().update_status(&session).await?;

        let event = DomainEvent::SessionStatusChanged(SessionStatusChangedEvent::new(
            session.id,
            from,
            session.status,
        ));
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }

        info!(
            session_id = %session_id,
            from = from.as_str(),
            "Session marked as errored"
        );

        Ok(SessionResponse::from(&session))
    }
}

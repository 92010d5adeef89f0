//! Viewer service
//!
//! Join/leave bookkeeping, presence, heartbeats, and per-viewer engagement.
//! The database row is the historical record; Redis presence answers "who is
//! watching right now".

use chrono::Utc;
use tracing::{info, instrument, warn};

use live_core::entities::{ConnectionQuality, LiveSession, SessionStatus, User, Viewer, ViewerType};
use live_core::events::{DomainEvent, ViewerJoinedEvent, ViewerLeftEvent};
use live_core::traits::CursorQuery;
use live_core::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::JoinSessionRequest;
use crate::dto::responses::{JoinSessionResponse, PaginatedResponse, ViewerResponse};

/// Default page size for viewer listings
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Viewer service
pub struct ViewerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewerService<'a> {
    /// Create a new viewer service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a session as a viewer.
    ///
    /// Authenticated users get one open row per session: joining again while
    /// active returns the existing row, and only a first-ever join counts
    /// toward `total_unique_viewers`. Anonymous viewers are always new.
    #[instrument(skip(self, user, request), fields(session_id = %session_id))]
    pub async fn join(
        &self,
        session_id: Snowflake,
        user: Option<&User>,
        request: JoinSessionRequest,
    ) -> ServiceResult<JoinSessionResponse> {
        let session = self.load_session(session_id).await?;

        // Joinable while broadcasting; a pause does not lock the doors
        if !matches!(session.status, SessionStatus::Live | SessionStatus::Paused) {
            return Err(ServiceError::conflict("Session is not live"));
        }

        let (user_id, first_time) = match user {
            Some(user) => {
                if let Some(existing) = self
                    .ctx
                    .viewer_repo()
                    .find_active_by_user(session_id, user.id)
                    .await?
                {
                    // Already watching: idempotent rejoin, counters untouched
                    self.mark_watching(session_id, existing.id).await;
                    return Ok(JoinSessionResponse {
                        viewer: ViewerResponse::from(&existing),
                        current_viewers: session.current_viewers,
                        peak_viewers: session.peak_viewers,
                    });
                }
                let first_time = !self
                    .ctx
                    .viewer_repo()
                    .has_joined_before(session_id, user.id)
                    .await?;
                (Some(user.id), first_time)
            }
            // Anonymous viewers carry no identity to dedupe against
            None => (None, true),
        };

        let viewer_type = match (&request.viewer_type, user) {
            (Some(vt), _) => ViewerType::from(vt.as_str()),
            (None, Some(user)) => ViewerType::from(user.role.as_str()),
            (None, None) => ViewerType::Anonymous,
        };

        let viewer = Viewer::new(self.ctx.generate_id(), session_id, user_id, viewer_type);
        self.ctx.viewer_repo().create(&viewer).await?;

        let updated = self
            .ctx
            .session_repo()
            .record_viewer_joined(session_id, first_time)
            .await?;

        self.mark_watching(session_id, viewer.id).await;

        self.publish(DomainEvent::ViewerJoined(ViewerJoinedEvent::new(
            session_id,
            viewer.id,
            updated.current_viewers,
        )))
        .await;

        info!(
            session_id = %session_id,
            viewer_id = %viewer.id,
            first_time = first_time,
            current_viewers = updated.current_viewers,
            "Viewer joined"
        );

        Ok(JoinSessionResponse {
            viewer: ViewerResponse::from(&viewer),
            current_viewers: updated.current_viewers,
            peak_viewers: updated.peak_viewers,
        })
    }

    /// Leave a session. A viewer row can be closed at most once; the watch
    /// duration freezes at the leave time.
    #[instrument(skip(self))]
    pub async fn leave(&self, viewer_id: Snowflake) -> ServiceResult<ViewerResponse> {
        let viewer = self.ctx.viewer_repo().mark_left(viewer_id, Utc::now()).await?;

        let updated = self
            .ctx
            .session_repo()
            .record_viewer_left(viewer.session_id)
            .await?;

        if let Err(e) = self
            .ctx
            .presence_store()
            .mark_left(viewer.session_id, viewer_id)
            .await
        {
            warn!(viewer_id = %viewer_id, error = %e, "Failed to clear viewer presence");
        }

        self.publish(DomainEvent::ViewerLeft(ViewerLeftEvent::new(
            viewer.session_id,
            viewer_id,
            updated.current_viewers,
        )))
        .await;

        info!(
            session_id = %viewer.session_id,
            viewer_id = %viewer_id,
            watch_seconds = viewer.watch_seconds,
            "Viewer left"
        );

        Ok(ViewerResponse::from(&viewer))
    }

    /// Get a viewer by ID
    #[instrument(skip(self))]
    pub async fn get(&self, viewer_id: Snowflake) -> ServiceResult<ViewerResponse> {
        let viewer = self.load(viewer_id).await?;
        Ok(ViewerResponse::from(&viewer))
    }

    /// List a session's viewers with pagination
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        session_id: Snowflake,
        before: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<ViewerResponse>> {
        self.load_session(session_id).await?;
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

        let viewers = self
            .ctx
            .viewer_repo()
            .find_by_session(
                session_id,
                CursorQuery {
                    before,
                    after: None,
                    limit,
                },
            )
            .await?;

        let cursor_of_last = viewers.last().map(|v| v.id.to_string());
        let data = viewers.iter().map(ViewerResponse::from).collect();

        Ok(PaginatedResponse::new(data, limit, cursor_of_last))
    }

    /// Refresh a viewer's presence heartbeat. Returns false when the viewer
    /// has aged out of the watching set and should rejoin.
    #[instrument(skip(self))]
    pub async fn heartbeat(
        &self,
        session_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<bool> {
        self.ctx
            .presence_store()
            .heartbeat(session_id, viewer_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))
    }

    /// Update a viewer's self-reported connection quality
    #[instrument(skip(self))]
    pub async fn set_connection_quality(
        &self,
        viewer_id: Snowflake,
        quality: &str,
    ) -> ServiceResult<ViewerResponse> {
        let quality = match quality {
            "good" | "degraded" | "poor" => ConnectionQuality::from(quality),
            other => {
                return Err(ServiceError::validation(format!(
                    "Unknown connection quality: {other}"
                )))
            }
        };

        let mut viewer = self.load(viewer_id).await?;
        self.ctx
            .viewer_repo()
            .set_connection_quality(viewer_id, quality)
            .await?;
        viewer.set_connection_quality(quality);

        Ok(ViewerResponse::from(&viewer))
    }

    /// Close viewers whose presence heartbeat has expired.
    ///
    /// Redis tells us who went silent; the database rows are then closed so
    /// the historical counters match.
    #[instrument(skip(self))]
    pub async fn reap_stale(&self, session_id: Snowflake) -> ServiceResult<u32> {
        let stale = self
            .ctx
            .presence_store()
            .prune_stale(session_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let now = Utc::now();
        let mut closed = 0u32;
        for viewer_id in stale {
            match self.ctx.viewer_repo().mark_left(viewer_id, now).await {
                Ok(_) => {
                    self.ctx.session_repo().record_viewer_left(session_id).await?;
                    closed += 1;
                }
                // Raced with an explicit leave; nothing left to do
                Err(e) if e.is_conflict() => {}
                Err(e) => return Err(e.into()),
            }
        }

        if closed > 0 {
            info!(session_id = %session_id, closed = closed, "Reaped stale viewers");
        }

        Ok(closed)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    pub(crate) async fn load(&self, viewer_id: Snowflake) -> ServiceResult<Viewer> {
        self.ctx
            .viewer_repo()
            .find_by_id(viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Viewer", viewer_id.to_string()))
    }

    async fn load_session(&self, session_id: Snowflake) -> ServiceResult<LiveSession> {
        self.ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id.to_string()))
    }

    async fn mark_watching(&self, session_id: Snowflake, viewer_id: Snowflake) {
        if let Err(e) = self
            .ctx
            .presence_store()
            .mark_watching(session_id, viewer_id)
            .await
        {
            warn!(viewer_id = %viewer_id, error = %e, "Failed to mark viewer watching");
        }
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

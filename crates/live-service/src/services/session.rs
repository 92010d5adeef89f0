//! Live session service
//!
//! Session lifecycle, details, listing, and media-room token signing.
//! Status transitions go through the entity's lifecycle graph; the store
//! only persists what the entity already accepted.

use chrono::Utc;
use tracing::{info, instrument, warn};

use live_common::auth::{RoomRole, RoomToken};
use live_core::entities::{LiveSession, SessionStatus, User};
use live_core::events::{
    DomainEvent, SessionCreatedEvent, SessionEndedEvent, SessionStatusChangedEvent,
};
use live_core::traits::{CursorQuery, SessionQuery};
use live_core::{RoomCode, Snowflake};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::requests::{CreateSessionRequest, ListSessionsRequest, UpdateSessionRequest};
use crate::dto::responses::{PaginatedResponse, SessionResponse};

/// Default page size for session listings
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Live session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new session service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create a new session for a hosting user
    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn create(
        &self,
        user: &User,
        request: CreateSessionRequest,
    ) -> ServiceResult<SessionResponse> {
        if !user.role.can_host() {
            return Err(ServiceError::permission_denied("host live sessions"));
        }

        let id = self.ctx.generate_id();
        let mut session = LiveSession::new(id, user.id, request.title, RoomCode::generate());
        session.description = request.description;
        session.scheduled_start = request.scheduled_start;

        self.ctx.session_repo().create(&session).await?;

        self.publish(DomainEvent::SessionCreated(SessionCreatedEvent::new(
            session.id,
            session.influencer_id,
        )))
        .await;

        info!(session_id = %session.id, room_code = %session.room_code, "Session created");

        Ok(SessionResponse::from(&session))
    }

    /// Get a session by ID
    #[instrument(skip(self))]
    pub async fn get(&self, session_id: Snowflake) -> ServiceResult<SessionResponse> {
        let session = self.load(session_id).await?;
        Ok(SessionResponse::from(&session))
    }

    /// Get a session by its room code
    #[instrument(skip(self))]
    pub async fn get_by_room_code(&self, code: &RoomCode) -> ServiceResult<SessionResponse> {
        let session = self
            .ctx
            .session_repo()
            .find_by_room_code(code)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", code.to_string()))?;
        Ok(SessionResponse::from(&session))
    }

    /// List sessions with optional filters and cursor pagination
    #[instrument(skip(self, request))]
    pub async fn list(
        &self,
        request: ListSessionsRequest,
        before: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<SessionResponse>> {
        let influencer_id = request
            .influencer_id
            .as_deref()
            .map(parse_snowflake)
            .transpose()?;
        let status = request.status.as_deref().map(parse_status).transpose()?;
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

        let sessions = self
            .ctx
            .session_repo()
            .list(SessionQuery {
                influencer_id,
                status,
                cursor: CursorQuery {
                    before,
                    after: None,
                    limit,
                },
            })
            .await?;

        let cursor_of_last = sessions.last().map(|s| s.id.to_string());
        let data = sessions.iter().map(SessionResponse::from).collect();

        Ok(PaginatedResponse::new(data, limit, cursor_of_last))
    }

    /// Update title/description/scheduled start; only the owner may edit,
    /// and an ended session is immutable.
    #[instrument(skip(self, request))]
    pub async fn update_details(
        &self,
        user_id: Snowflake,
        session_id: Snowflake,
        request: UpdateSessionRequest,
    ) -> ServiceResult<SessionResponse> {
        let mut session = self.load_owned(session_id, user_id).await?;

        session.update_details(request.title, request.description.map(Some))?;
        if let Some(scheduled_start) = request.scheduled_start {
            session.scheduled_start = Some(scheduled_start);
        }

        self.ctx.session_repo().update_details(&session).await?;

        Ok(SessionResponse::from(&session))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start broadcasting
    pub async fn start(&self, user_id: Snowflake, session_id: Snowflake) -> ServiceResult<SessionResponse> {
        self.transition(user_id, session_id, SessionStatus::Live).await
    }

    /// Pause the broadcast
    pub async fn pause(&self, user_id: Snowflake, session_id: Snowflake) -> ServiceResult<SessionResponse> {
        self.transition(user_id, session_id, SessionStatus::Paused).await
    }

    /// Resume a paused broadcast
    pub async fn resume(&self, user_id: Snowflake, session_id: Snowflake) -> ServiceResult<SessionResponse> {
        self.transition(user_id, session_id, SessionStatus::Live).await
    }

    /// Cancel a session that never went (or is no longer) live
    pub async fn cancel(&self, user_id: Snowflake, session_id: Snowflake) -> ServiceResult<SessionResponse> {
        self.transition(user_id, session_id, SessionStatus::Cancelled).await
    }

    /// End the broadcast.
    ///
    /// Runs as one transaction in the store: the status flips to `ended`,
    /// every still-open viewer row is closed at the end time, and the average
    /// watch duration is snapshotted. Presence is cleared afterwards.
    #[instrument(skip(self))]
    pub async fn end(
        &self,
        user_id: Snowflake,
        session_id: Snowflake,
    ) -> ServiceResult<SessionResponse> {
        let session = self.load_owned(session_id, user_id).await?;

        // Surface the precise transition error instead of the store's not-found
        if !session.status.can_transition_to(SessionStatus::Ended) {
            return Err(ServiceError::Domain(
                live_core::DomainError::InvalidTransition {
                    from: session.status,
                    to: SessionStatus::Ended,
                },
            ));
        }

        let ended = self
            .ctx
            .session_repo()
            .end_session(session_id, Utc::now())
            .await?;

        if let Err(e) = self.ctx.presence_store().clear_session(session_id).await {
            warn!(session_id = %session_id, error = %e, "Failed to clear session presence");
        }

        self.publish(DomainEvent::SessionEnded(SessionEndedEvent {
            session_id: ended.id,
            peak_viewers: ended.peak_viewers,
            total_unique_viewers: ended.total_unique_viewers,
            total_revenue_cents: ended.total_revenue_cents,
            timestamp: Utc::now(),
        }))
        .await;

        info!(
            session_id = %session_id,
            peak_viewers = ended.peak_viewers,
            total_revenue_cents = ended.total_revenue_cents,
            "Session ended"
        );

        Ok(SessionResponse::from(&ended))
    }

    /// Record a share of the session link
    #[instrument(skip(self))]
    pub async fn record_share(&self, session_id: Snowflake) -> ServiceResult<()> {
        // Existence check so unknown sessions 404 instead of silently no-op
        self.load(session_id).await?;
        self.ctx.session_repo().record_share(session_id).await?;
        Ok(())
    }

    // ========================================================================
    // Room tokens
    // ========================================================================

    /// Sign a media-room token for a participant.
    ///
    /// The session owner gets the publishing host role; everyone else is a
    /// subscribe-only viewer. Tokens are only issued while the session is in
    /// a joinable state.
    #[instrument(skip(self))]
    pub async fn room_token(
        &self,
        user_id: Snowflake,
        session_id: Snowflake,
    ) -> ServiceResult<RoomToken> {
        let session = self.load(session_id).await?;

        if session.status.is_terminal() {
            return Err(ServiceError::conflict("Session is no longer joinable"));
        }

        let role = if session.is_owner(user_id) {
            RoomRole::Host
        } else {
            RoomRole::Viewer
        };

        let token = self
            .ctx
            .jwt_service()
            .sign_room_token(&session.room_code, role, user_id)?;

        info!(
            session_id = %session_id,
            participant = %user_id,
            role = role.as_str(),
            "Room token signed"
        );

        Ok(token)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    pub(crate) async fn load(&self, session_id: Snowflake) -> ServiceResult<LiveSession> {
        self.ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id.to_string()))
    }

    async fn load_owned(
        &self,
        session_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<LiveSession> {
        let session = self.load(session_id).await?;
        if !session.is_owner(user_id) {
            return Err(ServiceError::permission_denied("manage this session"));
        }
        Ok(session)
    }

    /// Apply a non-ending lifecycle transition and persist it
    #[instrument(skip(self))]
    async fn transition(
        &self,
        user_id: Snowflake,
        session_id: Snowflake,
        next: SessionStatus,
    ) -> ServiceResult<SessionResponse> {
        let mut session = self.load_owned(session_id, user_id).await?;
        let from = session.status;

        session.transition_to(next)?;
        self.ctx.session_repo().update_status(&session).await?;

        self.publish(DomainEvent::SessionStatusChanged(
            SessionStatusChangedEvent::new(session.id, from, next),
        ))
        .await;

        info!(
            session_id = %session_id,
            from = from.as_str(),
            to = next.as_str(),
            "Session status changed"
        );

        Ok(SessionResponse::from(&session))
    }

    /// Publish a domain event; delivery failures are logged, never fatal
    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

/// Parse a Snowflake ID from its string form
pub(crate) fn parse_snowflake(value: &str) -> ServiceResult<Snowflake> {
    value
        .parse::<i64>()
        .map(Snowflake::new)
        .map_err(|_| ServiceError::validation(format!("Invalid ID: {value}")))
}

/// Parse a session status filter, rejecting unknown values
fn parse_status(value: &str) -> ServiceResult<SessionStatus> {
    match value {
        "scheduled" | "live" | "paused" | "ended" | "cancelled" | "error" => {
            Ok(SessionStatus::from(value))
        }
        other => Err(ServiceError::validation(format!(
            "Unknown session status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(parse_snowflake("12345").unwrap(), Snowflake::new(12345));
        assert!(parse_snowflake("not-a-number").is_err());
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert_eq!(parse_status("live").unwrap(), SessionStatus::Live);
        assert!(parse_status("broadcasting").is_err());
    }
}

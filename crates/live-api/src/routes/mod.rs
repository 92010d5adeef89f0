//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, chat, dashboard, goals, health, maintenance, sessions, showcase, users, viewers,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(session_routes())
        .merge(goal_routes())
        .merge(dashboard_routes())
        .merge(maintenance_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/@me", delete(users::delete_current_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/achievements", get(dashboard::list_achievements))
}

/// Session routes, including viewers, chat, and showcased products
fn session_routes() -> Router<AppState> {
    Router::new()
        // Session CRUD and lifecycle
        .route("/sessions", post(sessions::create_session))
        .route("/sessions", get(sessions::list_sessions))
        .route("/sessions/by-code/:room_code", get(sessions::get_session_by_room_code))
        .route("/sessions/:session_id", get(sessions::get_session))
        .route("/sessions/:session_id", patch(sessions::update_session))
        .route("/sessions/:session_id/start", post(sessions::start_session))
        .route("/sessions/:session_id/pause", post(sessions::pause_session))
        .route("/sessions/:session_id/resume", post(sessions::resume_session))
        .route("/sessions/:session_id/end", post(sessions::end_session))
        .route("/sessions/:session_id/cancel", post(sessions::cancel_session))
        .route("/sessions/:session_id/share", post(sessions::record_share))
        .route("/sessions/:session_id/room-token", post(sessions::create_room_token))
        // Viewers
        .route("/sessions/:session_id/viewers", post(viewers::join_session))
        .route("/sessions/:session_id/viewers", get(viewers::list_viewers))
        .route("/sessions/:session_id/viewers/:viewer_id", get(viewers::get_viewer))
        .route(
            "/sessions/:session_id/viewers/:viewer_id/leave",
            post(viewers::leave_session),
        )
        .route(
            "/sessions/:session_id/viewers/:viewer_id/heartbeat",
            post(viewers::heartbeat),
        )
        .route(
            "/sessions/:session_id/viewers/:viewer_id/connection-quality",
            put(viewers::set_connection_quality),
        )
        // Chat
        .route("/sessions/:session_id/messages", get(chat::list_messages))
        .route("/sessions/:session_id/messages", post(chat::create_message))
        .route(
            "/sessions/:session_id/messages/:message_id",
            delete(chat::delete_message),
        )
        .route(
            "/sessions/:session_id/messages/:message_id/flag",
            post(chat::flag_message),
        )
        .route(
            "/sessions/:session_id/messages/:message_id/reactions",
            post(chat::add_reaction),
        )
        // Showcased products
        .route("/sessions/:session_id/products", get(showcase::list_showcases))
        .route("/sessions/:session_id/products", post(showcase::create_showcase))
        .route(
            "/sessions/:session_id/products/:showcase_id",
            get(showcase::get_showcase),
        )
        .route(
            "/sessions/:session_id/products/:showcase_id",
            patch(showcase::update_showcase),
        )
        .route(
            "/sessions/:session_id/products/:showcase_id/view",
            post(showcase::record_view),
        )
        .route(
            "/sessions/:session_id/products/:showcase_id/click",
            post(showcase::record_click),
        )
        .route(
            "/sessions/:session_id/products/:showcase_id/cart",
            post(showcase::record_cart),
        )
        .route(
            "/sessions/:session_id/products/:showcase_id/order",
            post(showcase::place_order),
        )
}

/// Goal routes
fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", post(goals::create_goal))
        .route("/goals", get(goals::list_goals))
        .route("/goals/:goal_id", get(goals::get_goal))
        .route("/goals/:goal_id", patch(goals::update_goal))
        .route("/goals/:goal_id", delete(goals::delete_goal))
        .route("/goals/:goal_id/progress", post(goals::set_goal_progress))
}

/// Dashboard and achievement routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(dashboard::get_summary))
        .route("/achievements", get(dashboard::list_own_achievements))
        .route("/achievements", post(dashboard::award_achievement))
}

/// Maintenance routes
fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/maintenance/expire-sessions", post(maintenance::expire_sessions))
        .route(
            "/maintenance/sessions/:session_id/reap-viewers",
            post(maintenance::reap_viewers),
        )
        .route(
            "/maintenance/sessions/:session_id/mark-error",
            post(maintenance::mark_session_error),
        )
}

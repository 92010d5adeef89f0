//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.display_name, request.display_name);
    assert_eq!(auth.user.role, "customer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/v1/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "CONFLICT");
}

#[tokio::test]
async fn test_register_admin_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.role = Some("admin".to_string());

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Register first
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    // Login
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.display_name, register_req.display_name);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Register
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Refresh
    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/api/v1/auth/refresh", &refresh_req).await.unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!tokens.access_token.is_empty());

    // The old refresh token is single-use
    let response = server.post("/api/v1/auth/refresh", &refresh_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_unique(&server).await;

    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["id"], auth.user.id);
    assert!(body["email"].is_string());
}

#[tokio::test]
async fn test_public_profile_hides_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_unique(&server).await;

    let response = server
        .get(&format!("/api/v1/users/{}", auth.user.id))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.get("email").is_none());
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_create_session_requires_hosting_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // A plain customer cannot host
    let customer = register_unique(&server).await;
    let response = server
        .post_auth(
            "/api/v1/sessions",
            &customer.access_token,
            &CreateSessionRequest::unique(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_session_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;

    // Create
    let session = create_session(&server, &host).await;
    assert_eq!(session.status, "scheduled");
    assert!(!session.room_code.is_empty());

    // Start
    let session = lifecycle(&server, &host, &session.id, "start").await;
    assert_eq!(session.status, "live");
    assert!(session.actual_start.is_some());

    // Pause and resume
    let session = lifecycle(&server, &host, &session.id, "pause").await;
    assert_eq!(session.status, "paused");
    let session = lifecycle(&server, &host, &session.id, "resume").await;
    assert_eq!(session.status, "live");

    // End
    let session = lifecycle(&server, &host, &session.id, "end").await;
    assert_eq!(session.status, "ended");
    assert!(session.actual_end.is_some());
    assert!(session.duration_seconds.is_some());

    // A second end is rejected
    let response = server
        .post_auth_empty(
            &format!("/api/v1/sessions/{}/end", session.id),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_start_requires_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let other = register_influencer(&server).await;

    let session = create_session(&server, &host).await;
    let response = server
        .post_auth_empty(
            &format!("/api/v1/sessions/{}/start", session.id),
            &other.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_get_session_by_room_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;

    let response = server
        .get(&format!("/api/v1/sessions/by-code/{}", session.room_code))
        .await
        .unwrap();
    let found: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, session.id);
}

// ============================================================================
// Viewer Tests
// ============================================================================

#[tokio::test]
async fn test_join_requires_live_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;

    // Still scheduled: joining is a conflict
    let response = server
        .post(
            &format!("/api/v1/sessions/{}/viewers", session.id),
            &JoinSessionRequest::default(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_viewer_counts_through_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;

    // Three anonymous viewers join
    let v1 = join_anonymous(&server, &session.id).await;
    let v2 = join_anonymous(&server, &session.id).await;
    let v3 = join_anonymous(&server, &session.id).await;
    assert_eq!(v3.current_viewers, 3);
    assert_eq!(v3.peak_viewers, 3);
    assert_eq!(v1.viewer.viewer_type, "anonymous");
    assert!(v2.viewer.user_id.is_none());

    // One leaves
    let response = server
        .post_empty(&format!(
            "/api/v1/sessions/{}/viewers/{}/leave",
            session.id, v1.viewer.id
        ))
        .await
        .unwrap();
    let left: ViewerResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(left.left_at.is_some());

    // Leaving twice is a conflict
    let response = server
        .post_empty(&format!(
            "/api/v1/sessions/{}/viewers/{}/leave",
            session.id, v1.viewer.id
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Ending the session closes out the remaining viewers
    let ended = lifecycle(&server, &host, &session.id, "end").await;
    assert_eq!(ended.current_viewers, 0);
    assert_eq!(ended.peak_viewers, 3);
    assert_eq!(ended.total_unique_viewers, 3);
}

#[tokio::test]
async fn test_authenticated_rejoin_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;

    let viewer_user = register_unique(&server).await;

    let first = join_as(&server, &session.id, &viewer_user.access_token).await;
    let second = join_as(&server, &session.id, &viewer_user.access_token).await;

    assert_eq!(first.viewer.id, second.viewer.id);
    assert_eq!(second.current_viewers, 1);

    let ended = lifecycle(&server, &host, &session.id, "end").await;
    assert_eq!(ended.total_unique_viewers, 1);
}

// ============================================================================
// Chat Tests
// ============================================================================

#[tokio::test]
async fn test_chat_message_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;

    let join = join_anonymous(&server, &session.id).await;

    // Post a message
    let request = CreateMessageRequest::chat(&join.viewer.id, "hello!");
    let response = server
        .post(&format!("/api/v1/sessions/{}/messages", session.id), &request)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.content, "hello!");
    assert_eq!(message.kind, "chat");

    // List includes it
    let response = server
        .get(&format!("/api/v1/sessions/{}/messages", session.id))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The host can delete it
    let response = server
        .delete_auth(
            &format!("/api/v1/sessions/{}/messages/{}", session.id, message.id),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Session counter updated
    let response = server
        .get(&format!("/api/v1/sessions/{}", session.id))
        .await
        .unwrap();
    let fetched: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.total_messages, 1);
}

// ============================================================================
// Showcase and Order Tests
// ============================================================================

#[tokio::test]
async fn test_order_flow_and_conversion() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;

    // Showcase a product at $15.00
    let request = CreateShowcaseRequest::priced("100200300", 1500);
    let response = server
        .post_auth(
            &format!("/api/v1/sessions/{}/products", session.id),
            &host.access_token,
            &request,
        )
        .await
        .unwrap();
    let showcase: ShowcaseResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(showcase.conversion_rate, 0.0);

    let join = join_anonymous(&server, &session.id).await;

    // Click then order
    let click = serde_json::json!({ "viewer_id": join.viewer.id });
    let response = server
        .post(
            &format!(
                "/api/v1/sessions/{}/products/{}/click",
                session.id, showcase.id
            ),
            &click,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let order_req = PlaceOrderRequest {
        viewer_id: join.viewer.id.clone(),
        quantity: 2,
        unit_price_cents: None,
    };
    let response = server
        .post(
            &format!(
                "/api/v1/sessions/{}/products/{}/order",
                session.id, showcase.id
            ),
            &order_req,
        )
        .await
        .unwrap();
    let order: OrderResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(order.revenue_cents, 3000);
    assert_eq!(order.showcase.order_count, 1);
    assert_eq!(order.showcase.click_count, 1);
    assert_eq!(order.showcase.conversion_rate, 1.0);

    // Session rollups
    let response = server
        .get(&format!("/api/v1/sessions/{}", session.id))
        .await
        .unwrap();
    let fetched: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.total_orders, 1);
    assert_eq!(fetched.total_revenue_cents, 3000);
}

#[tokio::test]
async fn test_quantity_cap_sells_out() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;

    let request = CreateShowcaseRequest::capped("100200301", 500, 3);
    let response = server
        .post_auth(
            &format!("/api/v1/sessions/{}/products", session.id),
            &host.access_token,
            &request,
        )
        .await
        .unwrap();
    let showcase: ShowcaseResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(showcase.remaining, Some(3));

    let join = join_anonymous(&server, &session.id).await;
    let orders_url = format!(
        "/api/v1/sessions/{}/products/{}/order",
        session.id, showcase.id
    );

    // Take the whole cap
    let order_req = PlaceOrderRequest {
        viewer_id: join.viewer.id.clone(),
        quantity: 3,
        unit_price_cents: None,
    };
    let response = server.post(&orders_url, &order_req).await.unwrap();
    let order: OrderResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(order.showcase.is_sold_out);
    assert_eq!(order.showcase.remaining, Some(0));

    // Any further order is rejected whole
    let order_req = PlaceOrderRequest {
        viewer_id: join.viewer.id,
        quantity: 1,
        unit_price_cents: None,
    };
    let response = server.post(&orders_url, &order_req).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Goal Tests
// ============================================================================

#[tokio::test]
async fn test_goal_progress_no_auto_complete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;

    let response = server
        .post_auth(
            "/api/v1/goals",
            &host.access_token,
            &CreateGoalRequest::unique(100),
        )
        .await
        .unwrap();
    let goal: GoalResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(goal.status, "active");

    // Overshooting caps the percentage but does not complete the goal
    let progress = SetGoalProgressRequest {
        current_value: 250,
        status: None,
    };
    let response = server
        .post_auth(
            &format!("/api/v1/goals/{}/progress", goal.id),
            &host.access_token,
            &progress,
        )
        .await
        .unwrap();
    let goal: GoalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(goal.progress_percent, 100.0);
    assert_eq!(goal.status, "active");

    // Completion must be explicit
    let progress = SetGoalProgressRequest {
        current_value: 250,
        status: Some("completed".to_string()),
    };
    let response = server
        .post_auth(
            &format!("/api/v1/goals/{}/progress", goal.id),
            &host.access_token,
            &progress,
        )
        .await
        .unwrap();
    let goal: GoalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(goal.status, "completed");
}

// ============================================================================
// Room Token Tests
// ============================================================================

#[tokio::test]
async fn test_room_token_roles() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let viewer_user = register_unique(&server).await;
    let session = create_session(&server, &host).await;

    let url = format!("/api/v1/sessions/{}/room-token", session.id);

    let response = server.post_auth_empty(&url, &host.access_token).await.unwrap();
    let token: RoomTokenResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(token.role, "host");
    assert_eq!(token.room, session.room_code);

    let response = server
        .post_auth_empty(&url, &viewer_user.access_token)
        .await
        .unwrap();
    let token: RoomTokenResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(token.role, "viewer");
}

#[tokio::test]
async fn test_room_token_rejected_after_end() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;
    lifecycle(&server, &host, &session.id, "end").await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/sessions/{}/room-token", session.id),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_summary() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;
    lifecycle(&server, &host, &session.id, "start").await;
    lifecycle(&server, &host, &session.id, "end").await;

    let response = server
        .get_auth("/api/v1/dashboard/summary", &host.access_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["session_count"], 1);
    assert_eq!(body["total_achievement_points"], 0);
}

// ============================================================================
// Maintenance Tests
// ============================================================================

#[tokio::test]
async fn test_maintenance_endpoints_require_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let host = register_influencer(&server).await;
    let session = create_session(&server, &host).await;

    // The admin gate fires before anything else, even for session owners
    let response = server
        .post_auth_empty("/api/v1/maintenance/expire-sessions", &host.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/maintenance/sessions/{}/reap-viewers", session.id),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/maintenance/sessions/{}/mark-error", session.id),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Helpers
// ============================================================================

async fn register_unique(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn register_influencer(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::influencer();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_session(server: &TestServer, host: &AuthResponse) -> SessionResponse {
    let response = server
        .post_auth(
            "/api/v1/sessions",
            &host.access_token,
            &CreateSessionRequest::unique(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn lifecycle(
    server: &TestServer,
    host: &AuthResponse,
    session_id: &str,
    action: &str,
) -> SessionResponse {
    let response = server
        .post_auth_empty(
            &format!("/api/v1/sessions/{session_id}/{action}"),
            &host.access_token,
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn join_anonymous(server: &TestServer, session_id: &str) -> JoinSessionResponse {
    let response = server
        .post(
            &format!("/api/v1/sessions/{session_id}/viewers"),
            &JoinSessionRequest::default(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn join_as(server: &TestServer, session_id: &str, token: &str) -> JoinSessionResponse {
    let response = server
        .post_auth(
            &format!("/api/v1/sessions/{session_id}/viewers"),
            token,
            &JoinSessionRequest::default(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

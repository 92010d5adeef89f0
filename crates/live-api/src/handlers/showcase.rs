//! Showcase handlers
//!
//! Endpoints for the products featured in a session and the
//! engagement funnel against them (views, clicks, carts, orders).

use axum::{
    extract::{Path, State},
    Json,
};
use live_service::{
    CreateShowcaseRequest, OrderResponse, PlaceOrderRequest, RecordClickRequest, ShowcaseResponse,
    ShowcaseService, UpdateShowcaseRequest,
};

use crate::extractors::path::{SessionIdPath, ShowcaseIdPath};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Add a product to a session's showcase
///
/// POST /sessions/:session_id/products
pub async fn create_showcase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SessionIdPath>,
    ValidatedJson(request): ValidatedJson<CreateShowcaseRequest>,
) -> ApiResult<Created<Json<ShowcaseResponse>>> {
    let session_id = path.session_id()?;
    let service = ShowcaseService::new(state.service_context());
    let response = service.create(auth.user_id, session_id, request).await?;
    Ok(Created(Json(response)))
}

/// List products showcased in a session
///
/// GET /sessions/:session_id/products
pub async fn list_showcases(
    State(state): State<AppState>,
    Path(path): Path<SessionIdPath>,
) -> ApiResult<Json<Vec<ShowcaseResponse>>> {
    let session_id = path.session_id()?;
    let service = ShowcaseService::new(state.service_context());
    let response = service.list(session_id).await?;
    Ok(Json(response))
}

/// Get a showcased product
///
/// GET /sessions/:session_id/products/:showcase_id
pub async fn get_showcase(
    State(state): State<AppState>,
    Path(path): Path<ShowcaseIdPath>,
) -> ApiResult<Json<ShowcaseResponse>> {
    let showcase_id = path.showcase_id()?;
    let service = ShowcaseService::new(state.service_context());
    let response = service.get(showcase_id).await?;
    Ok(Json(response))
}

/// Update a showcased product
///
/// PATCH /sessions/:session_id/products/:showcase_id
pub async fn update_showcase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ShowcaseIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateShowcaseRequest>,
) -> ApiResult<Json<ShowcaseResponse>> {
    let showcase_id = path.showcase_id()?;
    let service = ShowcaseService::new(state.service_context());
    let response = service.update(auth.user_id, showcase_id, request).await?;
    Ok(Json(response))
}

/// Record a product card impression
///
/// POST /sessions/:session_id/products/:showcase_id/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(path): Path<ShowcaseIdPath>,
) -> ApiResult<NoContent> {
    let showcase_id = path.showcase_id()?;
    let service = ShowcaseService::new(state.service_context());
    service.record_view(showcase_id).await?;
    Ok(NoContent)
}

/// Record a detail-page click from a viewer
///
/// POST /sessions/:session_id/products/:showcase_id/click
pub async fn record_click(
    State(state): State<AppState>,
    Path(path): Path<ShowcaseIdPath>,
    ValidatedJson(request): ValidatedJson<RecordClickRequest>,
) -> ApiResult<NoContent> {
    let showcase_id = path.showcase_id()?;
    let viewer_id = super::parse_id(&request.viewer_id, "viewer_id")?;
    let service = ShowcaseService::new(state.service_context());
    service.record_click(showcase_id, viewer_id).await?;
    Ok(NoContent)
}

/// Record an add-to-cart
///
/// POST /sessions/:session_id/products/:showcase_id/cart
pub async fn record_cart(
    State(state): State<AppState>,
    Path(path): Path<ShowcaseIdPath>,
) -> ApiResult<NoContent> {
    let showcase_id = path.showcase_id()?;
    let service = ShowcaseService::new(state.service_context());
    service.record_cart(showcase_id).await?;
    Ok(NoContent)
}

/// Place an order against a showcased product
///
/// POST /sessions/:session_id/products/:showcase_id/orders
pub async fn place_order(
    State(state): State<AppState>,
    Path(path): Path<ShowcaseIdPath>,
    ValidatedJson(request): ValidatedJson<PlaceOrderRequest>,
) -> ApiResult<Created<Json<OrderResponse>>> {
    let showcase_id = path.showcase_id()?;
    let viewer_id = super::parse_id(&request.viewer_id, "viewer_id")?;
    let service = ShowcaseService::new(state.service_context());
    let response = service.place_order(viewer_id, showcase_id, request).await?;
    Ok(Created(Json(response)))
}

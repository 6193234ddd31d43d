//! HTTP API
//!
//! - public: health, staff login, QR verify
//! - admin: staff JWT required (tables, QR issuing, menu, modifiers)
//! - guest: table QR token required

pub mod auth;
pub mod health;
pub mod menu;
pub mod modifiers;
pub mod qr;
pub mod tables;

use axum::routing::{get, patch, post, put};
use axum::{Json, Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::AppError;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::auth::{qr_guard_middleware, staff_auth_middleware};
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Upper bound on requests handled at once
const MAX_CONCURRENT_REQUESTS: usize = 256;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// UUID v4 request id generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login))
        .route("/qr/verify", get(qr::verify));

    let admin = Router::new()
        // QR issuing
        .route("/qr/generate/{table_id}", post(qr::generate))
        .route("/qr/regenerate/{table_id}", post(qr::generate))
        .route("/qr/regenerate-all", post(qr::regenerate_all))
        // Tables
        .route(
            "/admin/tables",
            get(tables::list_tables).post(tables::create_table),
        )
        .route(
            "/admin/tables/{id}",
            get(tables::get_table)
                .put(tables::update_table)
                .delete(tables::delete_table),
        )
        .route("/admin/tables/{id}/status", patch(tables::update_status))
        // Menu items
        .route(
            "/admin/menu/items",
            get(menu::list_items).post(menu::create_item),
        )
        .route(
            "/admin/menu/items/{item_id}",
            get(menu::get_item).delete(menu::delete_item),
        )
        .route("/admin/menu/items/{item_id}/status", patch(menu::set_status))
        .route(
            "/admin/menu/items/{item_id}/modifier-groups",
            get(modifiers::list_item_groups).post(modifiers::attach_groups),
        )
        .route(
            "/admin/menu/items/{item_id}/modifier-groups/{group_id}",
            axum::routing::delete(modifiers::detach_group),
        )
        // Modifier groups and options
        .route(
            "/admin/menu/modifier-groups",
            get(modifiers::list_groups).post(modifiers::create_group),
        )
        .route(
            "/admin/menu/modifier-groups/{id}",
            get(modifiers::get_group)
                .put(modifiers::update_group)
                .delete(modifiers::delete_group),
        )
        .route(
            "/admin/menu/modifier-groups/{id}/options",
            post(modifiers::add_option),
        )
        .route("/admin/menu/modifier-options/{id}", put(modifiers::update_option))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth_middleware,
        ));

    let guest = Router::new()
        .route("/qr/protected-menu", get(qr::protected_menu))
        .route("/guest/menu", get(menu::guest_menu))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            qr_guard_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .merge(guest)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        // Guest clients load from the QR landing page origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Propagate sits inside Set so the generated id reaches the response
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, XRequestId))
        .with_state(state)
}

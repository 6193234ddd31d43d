//! Menu item endpoints and the guest menu

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::error::ApiResponse;
use shared::models::{
    GuestMenu, GuestMenuQuery, MenuItem, MenuItemCreate, MenuItemStatusUpdate, TableAccess,
};

use crate::auth::StaffIdentity;
use crate::state::AppState;

use super::ApiResult;

pub async fn list_items(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<MenuItem>> {
    let items = state.menu.list_items(identity.restaurant_id).await?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    let item = state.menu.create_item(identity.restaurant_id, data).await?;
    Ok(Json(item))
}

pub async fn get_item(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(item_id): Path<i64>,
) -> ApiResult<MenuItem> {
    let item = state.menu.get_item(identity.restaurant_id, item_id).await?;
    Ok(Json(item))
}

pub async fn set_status(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(item_id): Path<i64>,
    Json(req): Json<MenuItemStatusUpdate>,
) -> ApiResult<MenuItem> {
    let item = state
        .menu
        .set_status(identity.restaurant_id, item_id, req.status)
        .await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(item_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.menu.delete_item(identity.restaurant_id, item_id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /guest/menu (QR-gated)
pub async fn guest_menu(
    State(state): State<AppState>,
    Extension(access): Extension<TableAccess>,
    Query(query): Query<GuestMenuQuery>,
) -> ApiResult<GuestMenu> {
    let menu = state.menu.guest_menu(access, query).await?;
    Ok(Json(menu))
}

//! Modifier group / option endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::ApiResponse;
use shared::models::{
    AttachModifierGroups, ModifierGroup, ModifierGroupCreate, ModifierGroupUpdate, ModifierOption,
    ModifierOptionCreate, ModifierOptionUpdate,
};

use crate::auth::StaffIdentity;
use crate::state::AppState;

use super::ApiResult;

pub async fn list_groups(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<ModifierGroup>> {
    let groups = state.modifiers.list_groups(identity.restaurant_id).await?;
    Ok(Json(groups))
}

pub async fn create_group(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<ModifierGroupCreate>,
) -> ApiResult<ModifierGroup> {
    let group = state
        .modifiers
        .create_group(identity.restaurant_id, data)
        .await?;
    Ok(Json(group))
}

pub async fn get_group(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<ModifierGroup> {
    let group = state.modifiers.get_group(identity.restaurant_id, id).await?;
    Ok(Json(group))
}

pub async fn update_group(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(patch): Json<ModifierGroupUpdate>,
) -> ApiResult<ModifierGroup> {
    let group = state
        .modifiers
        .update_group(identity.restaurant_id, id, patch)
        .await?;
    Ok(Json(group))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state
        .modifiers
        .delete_group(identity.restaurant_id, id)
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn add_option(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ModifierOptionCreate>,
) -> ApiResult<ModifierOption> {
    let option = state
        .modifiers
        .add_option(identity.restaurant_id, id, data)
        .await?;
    Ok(Json(option))
}

pub async fn update_option(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(patch): Json<ModifierOptionUpdate>,
) -> ApiResult<ModifierOption> {
    let option = state
        .modifiers
        .update_option(identity.restaurant_id, id, patch)
        .await?;
    Ok(Json(option))
}

pub async fn list_item_groups(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(item_id): Path<i64>,
) -> ApiResult<Vec<ModifierGroup>> {
    let groups = state
        .modifiers
        .list_item_groups(identity.restaurant_id, item_id)
        .await?;
    Ok(Json(groups))
}

/// POST /admin/menu/items/{item_id}/modifier-groups (full replace)
pub async fn attach_groups(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(item_id): Path<i64>,
    Json(req): Json<AttachModifierGroups>,
) -> ApiResult<Vec<ModifierGroup>> {
    let groups = state
        .modifiers
        .attach_groups_to_item(identity.restaurant_id, item_id, req.modifier_group_ids)
        .await?;
    Ok(Json(groups))
}

pub async fn detach_group(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path((item_id, group_id)): Path<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    state
        .modifiers
        .detach_group_from_item(identity.restaurant_id, item_id, group_id)
        .await?;
    Ok(Json(ApiResponse::ok()))
}

//! Table administration endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::error::ApiResponse;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TablePage, TableQuery, TableStatusUpdate,
};

use crate::auth::StaffIdentity;
use crate::state::AppState;

use super::ApiResult;

pub async fn list_tables(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Query(query): Query<TableQuery>,
) -> ApiResult<TablePage> {
    let page = state.tables.list(identity.restaurant_id, query).await?;
    Ok(Json(page))
}

pub async fn create_table(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<DiningTableCreate>,
) -> ApiResult<DiningTable> {
    let table = state.tables.create(identity.restaurant_id, data).await?;
    Ok(Json(table))
}

pub async fn get_table(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<DiningTable> {
    let table = state.tables.get(identity.restaurant_id, id).await?;
    Ok(Json(table))
}

pub async fn update_table(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<DiningTableUpdate>,
) -> ApiResult<DiningTable> {
    let table = state.tables.update(identity.restaurant_id, id, data).await?;
    Ok(Json(table))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<TableStatusUpdate>,
) -> ApiResult<DiningTable> {
    let table = state
        .tables
        .update_status(identity.restaurant_id, id, req.status)
        .await?;
    Ok(Json(table))
}

pub async fn delete_table(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.tables.remove(identity.restaurant_id, id).await?;
    Ok(Json(ApiResponse::ok()))
}

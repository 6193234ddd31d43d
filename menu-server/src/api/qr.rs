//! QR token endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{IssuedToken, QrVerifyResponse, RegenerateAllResult, TableAccess};

use crate::auth::StaffIdentity;
use crate::qr::QrVerification;
use crate::state::AppState;

use super::ApiResult;

/// POST /qr/generate/{table_id} and /qr/regenerate/{table_id}
pub async fn generate(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(table_id): Path<i64>,
) -> ApiResult<IssuedToken> {
    let issued = state.qr.issue(identity.restaurant_id, table_id).await?;
    Ok(Json(issued))
}

/// POST /qr/regenerate-all
pub async fn regenerate_all(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<RegenerateAllResult> {
    let result = state.qr.regenerate_all(identity.restaurant_id).await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

/// GET /qr/verify?token=...
pub async fn verify(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> ApiResult<QrVerifyResponse> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::QrTokenMissing))?;

    match state.qr.verify(&token).await? {
        QrVerification::Valid(access) => Ok(Json(QrVerifyResponse {
            valid: true,
            table_id: Some(access.table_id),
            table_number: Some(access.table_number),
            message: None,
        })),
        QrVerification::Invalid(reason) => Err(reason.to_app_error()),
    }
}

/// GET /qr/protected-menu
pub async fn protected_menu(Extension(access): Extension<TableAccess>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to table {}", access.table_number),
        "table_id": access.table_id,
        "table_number": access.table_number,
    }))
}

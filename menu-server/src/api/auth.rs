//! Staff login

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::verify_password;

use super::ApiResult;

/// POST /auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub staff_id: i64,
    pub restaurant_id: i64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let staff = state
        .store
        .find_staff_by_email(&email)
        .await
        .map_err(|e| AppError::from(ServiceError::from(e)))?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &staff.password_hash) {
        tracing::info!(staff_id = staff.id, "Login rejected: wrong password");
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let token = crate::auth::staff_auth::create_token(
        staff.id,
        staff.restaurant_id,
        &staff.email,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(staff_id = staff.id, "Staff logged in");

    Ok(Json(LoginResponse {
        token,
        staff_id: staff.id,
        restaurant_id: staff.restaurant_id,
    }))
}

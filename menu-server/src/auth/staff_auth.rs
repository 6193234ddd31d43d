//! Staff JWT authentication for the admin API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JWT claims for staff authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Staff ID
    pub sub: String,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: i64,
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated staff identity extracted from JWT
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    pub staff_id: i64,
    pub restaurant_id: i64,
    pub email: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a staff member
pub fn create_token(
    staff_id: i64,
    restaurant_id: i64,
    email: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = StaffClaims {
        sub: staff_id.to_string(),
        restaurant_id,
        email: email.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and verify a staff token
pub fn decode_token(token: &str, secret: &str) -> Result<StaffIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::new(ErrorCode::TokenExpired)
            }
            _ => AppError::with_message(ErrorCode::TokenInvalid, "Invalid or expired token"),
        }
    })?;

    let staff_id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::new(ErrorCode::TokenInvalid))?;

    Ok(StaffIdentity {
        staff_id,
        restaurant_id: token_data.claims.restaurant_id,
        email: token_data.claims.email,
    })
}

/// Middleware that extracts and verifies the staff JWT from the Authorization header
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotAuthenticated, "Missing Authorization header")
                .into_response()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::with_message(ErrorCode::NotAuthenticated, "Invalid Authorization format")
            .into_response()
    })?;

    let identity = decode_token(token, &state.jwt_secret).map_err(IntoResponse::into_response)?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "staff-secret-for-tests";

    #[test]
    fn test_create_and_decode() {
        let token = create_token(17, 3, "chef@bistro.test", SECRET).unwrap();
        let identity = decode_token(&token, SECRET).unwrap();
        assert_eq!(identity.staff_id, 17);
        assert_eq!(identity.restaurant_id, 3);
        assert_eq!(identity.email, "chef@bistro.test");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(17, 3, "chef@bistro.test", SECRET).unwrap();
        let err = decode_token(&token, "another-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }
}

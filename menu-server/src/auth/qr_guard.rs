//! QR token guard for guest routes

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use crate::qr::QrVerification;
use crate::state::AppState;

/// Header carrying the table token when it is not in the query string
pub const QR_TOKEN_HEADER: &str = "x-qr-token";

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Token from `?token=` or the `x-qr-token` header; the query wins
pub fn extract_token(request: &Request) -> Option<String> {
    let from_query = Query::<TokenQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty());

    from_query.or_else(|| {
        request
            .headers()
            .get(QR_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Verify the table token and attach [`shared::models::TableAccess`] to the request
pub async fn qr_guard_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(&request)
        .ok_or_else(|| AppError::new(ErrorCode::QrTokenMissing).into_response())?;

    match state.qr.verify(&token).await {
        Ok(QrVerification::Valid(access)) => {
            request.extensions_mut().insert(access);
            Ok(next.run(request).await)
        }
        Ok(QrVerification::Invalid(reason)) => Err(reason.to_app_error().into_response()),
        Err(e) => Err(e.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, header: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri(uri);
        if let Some(value) = header {
            builder = builder.header(QR_TOKEN_HEADER, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_token_from_query() {
        let req = request("/guest/menu?token=abc", None);
        assert_eq!(extract_token(&req).as_deref(), Some("abc"));
    }

    #[test]
    fn test_token_from_header() {
        let req = request("/guest/menu", Some("hdr"));
        assert_eq!(extract_token(&req).as_deref(), Some("hdr"));
    }

    #[test]
    fn test_query_wins_over_header() {
        let req = request("/guest/menu?token=q", Some("hdr"));
        assert_eq!(extract_token(&req).as_deref(), Some("q"));
    }

    #[test]
    fn test_missing_token() {
        assert!(extract_token(&request("/guest/menu", None)).is_none());
        assert!(extract_token(&request("/guest/menu?token=", None)).is_none());
    }
}

//! Table QR token signing and decoding
//!
//! Tokens are HS256 JWTs binding a guest session to one table. The
//! signature and expiry are only the first gate: a decoded token must
//! still match the table's stored current token (see [`super::QrService`]).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const QR_TOKEN_ISSUER: &str = "menu-server";
pub const QR_TOKEN_AUDIENCE: &str = "table-qr";

/// Claims embedded in a table QR token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrClaims {
    /// Table id
    pub sub: String,
    #[serde(rename = "tableNumber")]
    pub table_number: i32,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: i64,
    pub iat: i64,
    pub exp: i64,
    /// Unique per issue so two tokens minted in the same second differ
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

impl QrClaims {
    pub fn table_id(&self) -> Result<i64, QrTokenError> {
        self.sub
            .parse()
            .map_err(|_| QrTokenError::InvalidToken(format!("non-numeric subject {}", self.sub)))
    }
}

#[derive(Error, Debug)]
pub enum QrTokenError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// HS256 signer/verifier for table tokens
#[derive(Clone)]
pub struct QrTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for QrTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrTokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl QrTokenSigner {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[QR_TOKEN_AUDIENCE]);
        validation.set_issuer(&[QR_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign a token for a table, valid from now for the configured window
    pub fn sign(
        &self,
        table_id: i64,
        table_number: i32,
        restaurant_id: i64,
    ) -> Result<String, QrTokenError> {
        self.sign_at(table_id, table_number, restaurant_id, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn sign_at(
        &self,
        table_id: i64,
        table_number: i32,
        restaurant_id: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<String, QrTokenError> {
        let claims = QrClaims {
            sub: table_id.to_string(),
            table_number,
            restaurant_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: QR_TOKEN_ISSUER.to_string(),
            aud: QR_TOKEN_AUDIENCE.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| QrTokenError::GenerationFailed(e.to_string()))
    }

    /// Check signature, structure, audience, issuer and expiry
    pub fn decode(&self, token: &str) -> Result<QrClaims, QrTokenError> {
        let token_data =
            decode::<QrClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => QrTokenError::ExpiredToken,
                    ErrorKind::InvalidSignature => QrTokenError::InvalidSignature,
                    _ => QrTokenError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

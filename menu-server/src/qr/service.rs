//! Table Access Token Service
//!
//! Each table holds a single current token. Issuing overwrites it, and
//! deactivating or removing the table clears it, so a token verifies only
//! while it is byte-for-byte the stored one.

use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use shared::models::{
    DiningTable, IssuedToken, RegenerateAllResult, RegeneratedToken, TableAccess, TableStatus,
};

use super::token::QrTokenSigner;
use crate::db::Store;
use crate::error::ServiceResult;

/// Why a presented token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Bad signature, malformed, wrong audience/issuer, or expired
    InvalidToken,
    /// Subject does not resolve to a live table
    TableNotFound,
    TableInactive,
    /// A newer token was issued, or the token was cleared
    TokenSuperseded,
}

impl InvalidReason {
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::InvalidToken => "invalid or expired token",
            InvalidReason::TableNotFound => "table not found or deleted",
            InvalidReason::TableInactive => "table is inactive, QR not available",
            InvalidReason::TokenSuperseded => "token is no longer valid",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InvalidReason::InvalidToken => "invalid_token",
            InvalidReason::TableNotFound => "table_not_found",
            InvalidReason::TableInactive => "table_inactive",
            InvalidReason::TokenSuperseded => "token_superseded",
        }
    }

    /// Guest-facing error: one generic message, the precise reason in details
    pub fn to_app_error(&self) -> AppError {
        AppError::new(ErrorCode::QrTokenInvalid)
            .with_detail("valid", false)
            .with_detail("reason", self.message())
            .with_detail("reason_code", self.code())
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`QrService::verify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrVerification {
    Valid(TableAccess),
    Invalid(InvalidReason),
}

impl QrVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, QrVerification::Valid(_))
    }
}

#[derive(Clone)]
pub struct QrService {
    store: Arc<dyn Store>,
    signer: QrTokenSigner,
}

impl QrService {
    pub fn new(store: Arc<dyn Store>, signer: QrTokenSigner) -> Self {
        Self { store, signer }
    }

    /// Sign a fresh token and make it the table's only valid one
    pub async fn issue(&self, restaurant_id: i64, table_id: i64) -> ServiceResult<IssuedToken> {
        let table = self
            .store
            .find_table(restaurant_id, table_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

        if !table.status.is_active() {
            return Err(AppError::new(ErrorCode::TableInactive).into());
        }

        let token = self
            .signer
            .sign(table.id, table.table_number, restaurant_id)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let stored = self
            .store
            .set_qr_token(restaurant_id, table.id, &token, shared::util::now_millis())
            .await?;
        if !stored {
            // Deactivated or removed after the lookup
            let code = match self.store.find_table(restaurant_id, table.id).await? {
                Some(_) => ErrorCode::TableInactive,
                None => ErrorCode::TableNotFound,
            };
            return Err(AppError::new(code).into());
        }

        tracing::info!(
            table_id = table.id,
            table_number = table.table_number,
            "QR token issued"
        );

        Ok(IssuedToken {
            token,
            table_number: table.table_number,
        })
    }

    /// Deactivate the table and clear its stored token in one write, so
    /// outstanding QR codes stop verifying and reactivation cannot revive them
    pub async fn invalidate_on_deactivate(
        &self,
        restaurant_id: i64,
        table_id: i64,
    ) -> ServiceResult<DiningTable> {
        let table = self
            .store
            .set_table_status(restaurant_id, table_id, TableStatus::Inactive)
            .await?;
        tracing::info!(table_id, "QR token invalidated");
        Ok(table)
    }

    /// Check a presented token
    ///
    /// Bad tokens come back as [`QrVerification::Invalid`]; only storage
    /// failures are errors.
    pub async fn verify(&self, token: &str) -> ServiceResult<QrVerification> {
        let claims = match self.signer.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "QR token rejected at decode");
                return Ok(self.rejected(InvalidReason::InvalidToken, None));
            }
        };
        let Ok(table_id) = claims.table_id() else {
            return Ok(self.rejected(InvalidReason::InvalidToken, None));
        };

        let Some(table) = self.store.find_table(claims.restaurant_id, table_id).await? else {
            return Ok(self.rejected(InvalidReason::TableNotFound, Some(table_id)));
        };

        if !table.status.is_active() {
            return Ok(self.rejected(InvalidReason::TableInactive, Some(table_id)));
        }

        if table.qr_token.as_deref() != Some(token) {
            return Ok(self.rejected(InvalidReason::TokenSuperseded, Some(table_id)));
        }

        Ok(QrVerification::Valid(TableAccess {
            table_id: table.id,
            table_number: table.table_number,
            restaurant_id: table.restaurant_id,
        }))
    }

    fn rejected(&self, reason: InvalidReason, table_id: Option<i64>) -> QrVerification {
        tracing::info!(?table_id, reason = reason.code(), "QR token verification failed");
        QrVerification::Invalid(reason)
    }

    /// Rotate every active table's token; per-table failures are reported, not fatal
    pub async fn regenerate_all(&self, restaurant_id: i64) -> ServiceResult<RegenerateAllResult> {
        let tables = self.store.list_active_tables(restaurant_id).await?;
        Ok(self.rotate(restaurant_id, tables).await)
    }

    /// Issue a fresh token for each listed table, collecting failures per table
    async fn rotate(&self, restaurant_id: i64, tables: Vec<DiningTable>) -> RegenerateAllResult {
        let mut results = Vec::with_capacity(tables.len());
        for table in tables {
            let outcome = self.issue(restaurant_id, table.id).await;
            let result = match outcome {
                Ok(issued) => RegeneratedToken {
                    table_id: table.id,
                    table_number: issued.table_number,
                    token: Some(issued.token),
                    error: None,
                },
                Err(e) => {
                    let app: AppError = e.into();
                    tracing::warn!(table_id = table.id, error = %app, "QR token regeneration failed");
                    RegeneratedToken {
                        table_id: table.id,
                        table_number: table.table_number,
                        token: None,
                        error: Some(app.message),
                    }
                }
            };
            results.push(result);
        }

        tracing::info!(restaurant_id, total = results.len(), "QR tokens regenerated");

        RegenerateAllResult {
            total: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, TableStore};
    use shared::models::DiningTableCreate;

    #[test]
    fn test_reason_codes() {
        assert_eq!(InvalidReason::TableInactive.code(), "table_inactive");
        assert_eq!(
            InvalidReason::TokenSuperseded.message(),
            "token is no longer valid"
        );
    }

    #[test]
    fn test_reason_to_app_error() {
        let err = InvalidReason::TableNotFound.to_app_error();
        assert_eq!(err.code, ErrorCode::QrTokenInvalid);
        assert_eq!(err.message, "QR code is no longer valid, please rescan");
        let details = err.details.unwrap();
        assert_eq!(details["valid"], false);
        assert_eq!(details["reason_code"], "table_not_found");
    }

    fn service() -> (Arc<MemoryStore>, QrService) {
        let store = Arc::new(MemoryStore::new());
        let signer = QrTokenSigner::new("qr-service-unit-test-secret", 24);
        (store.clone(), QrService::new(store, signer))
    }

    async fn table(store: &MemoryStore, number: i32) -> DiningTable {
        store
            .create_table(
                1,
                &DiningTableCreate {
                    table_number: number,
                    capacity: 2,
                    location: "Bar".into(),
                    description: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rotate_reports_failed_table_and_continues() {
        let (store, qr) = service();
        let first = table(&store, 1).await;
        let second = table(&store, 2).await;
        let third = table(&store, 3).await;

        // Snapshot taken before the middle table is deactivated
        let listed = store.list_active_tables(1).await.unwrap();
        store
            .set_table_status(1, second.id, TableStatus::Inactive)
            .await
            .unwrap();

        let result = qr.rotate(1, listed).await;
        assert_eq!(result.total, 3);

        let failed = &result.results[1];
        assert_eq!(failed.table_id, second.id);
        assert!(failed.token.is_none());
        assert!(failed.error.is_some());

        for (rotated, original) in [(&result.results[0], &first), (&result.results[2], &third)] {
            assert_eq!(rotated.table_id, original.id);
            assert!(rotated.error.is_none());
            let token = rotated.token.as_deref().unwrap();
            assert!(qr.verify(token).await.unwrap().is_valid());
        }

        let raw = store.find_table(1, second.id).await.unwrap().unwrap();
        assert_eq!(raw.qr_token, None);
    }

    #[tokio::test]
    async fn test_issue_after_deactivation_stores_nothing() {
        let (store, qr) = service();
        let t = table(&store, 4).await;
        let old = qr.issue(1, t.id).await.unwrap().token;

        qr.invalidate_on_deactivate(1, t.id).await.unwrap();
        let err = AppError::from(qr.issue(1, t.id).await.unwrap_err());
        assert_eq!(err.code, ErrorCode::TableInactive);

        store
            .set_table_status(1, t.id, TableStatus::Active)
            .await
            .unwrap();
        assert_eq!(
            qr.verify(&old).await.unwrap(),
            QrVerification::Invalid(InvalidReason::TokenSuperseded)
        );
    }
}

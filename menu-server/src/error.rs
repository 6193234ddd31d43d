//! Service-layer error type
//!
//! `ServiceError` bridges repository errors (`RepoError`, `sqlx::Error`,
//! `BoxError`) and the API-layer `AppError`, so services can use `?`
//! everywhere and handlers get a response-ready error.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::BoxError;
use crate::db::RepoError;

/// Service-layer error
///
/// - `Db`: storage/infrastructure failure (logged, mapped to InternalError)
/// - `App`: business-rule error, passed to the client as is
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(what) => ServiceError::App(AppError::not_found(what)),
            RepoError::Duplicate(what) => ServiceError::App(AppError::conflict(what)),
            RepoError::Database(err) => ServiceError::Db(err),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_app_codes() {
        let not_found: AppError = ServiceError::from(RepoError::NotFound("table 1".into())).into();
        assert_eq!(not_found.code, ErrorCode::NotFound);

        let dup: AppError = ServiceError::from(RepoError::Duplicate("x".into())).into();
        assert_eq!(dup.code, ErrorCode::AlreadyExists);
    }

    #[test]
    fn test_db_error_hides_detail() {
        let err = ServiceError::from(RepoError::Database("connection reset".into()));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert!(!app.message.contains("connection reset"));
    }
}

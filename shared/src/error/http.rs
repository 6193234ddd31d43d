//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::MenuItemNotFound
            | Self::ModifierGroupNotFound
            | Self::ModifierOptionNotFound
            | Self::ModifierNotAttached
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::TableNumberExists => StatusCode::CONFLICT,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::QrTokenInvalid
            | Self::QrTokenMissing => StatusCode::UNAUTHORIZED,

            Self::TableInactive => StatusCode::FORBIDDEN,

            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::ValidationFailed
            | Self::MenuItemInvalidPrice
            | Self::ModifierCardinalityInvalid
            | Self::ModifierRequiresOptions
            | Self::ModifierGroupsUnresolved => StatusCode::BAD_REQUEST,
        }
    }
}

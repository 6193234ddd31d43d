//! Numeric error codes shared by the admin and guest clients
//!
//! - 0xxx: general
//! - 1xxx: staff authentication
//! - 6xxx: menu items, modifier groups and options
//! - 7xxx: tables and QR access tokens
//! - 9xxx: system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every error body
///
/// Serialized as a bare number so clients switch on the code rather than
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    // ==================== 1xxx: Staff auth ====================
    /// No bearer token on an admin route
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,

    // ==================== 6xxx: Menu ====================
    MenuItemNotFound = 6001,
    /// Negative price
    MenuItemInvalidPrice = 6002,
    ModifierGroupNotFound = 6301,
    ModifierOptionNotFound = 6302,
    /// min/max selections contradict each other
    ModifierCardinalityInvalid = 6303,
    /// Required group with zero options
    ModifierRequiresOptions = 6304,
    /// Attach request named groups that do not exist
    ModifierGroupsUnresolved = 6305,
    ModifierNotAttached = 6306,

    // ==================== 7xxx: Table ====================
    TableNotFound = 7001,
    /// Another live table already uses the number
    TableNumberExists = 7002,
    TableInactive = 7003,
    /// Bad, expired, superseded or revoked table token
    QrTokenInvalid = 7101,
    QrTokenMissing = 7102,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message, used when the error carries no custom one
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",

            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Invalid menu item price",
            ErrorCode::ModifierGroupNotFound => "Modifier group not found",
            ErrorCode::ModifierOptionNotFound => "Modifier option not found",
            ErrorCode::ModifierCardinalityInvalid => "Invalid modifier selection bounds",
            ErrorCode::ModifierRequiresOptions => "Required modifier group must have options",
            ErrorCode::ModifierGroupsUnresolved => "Some modifier groups could not be found",
            ErrorCode::ModifierNotAttached => "Modifier group is not attached to this item",

            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::TableInactive => "Table is inactive, QR not available",
            ErrorCode::QrTokenInvalid => "QR code is no longer valid, please rescan",
            ErrorCode::QrTokenMissing => "QR token is required",

            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of the [`ErrorCode`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,

            6001 => ErrorCode::MenuItemNotFound,
            6002 => ErrorCode::MenuItemInvalidPrice,
            6301 => ErrorCode::ModifierGroupNotFound,
            6302 => ErrorCode::ModifierOptionNotFound,
            6303 => ErrorCode::ModifierCardinalityInvalid,
            6304 => ErrorCode::ModifierRequiresOptions,
            6305 => ErrorCode::ModifierGroupsUnresolved,
            6306 => ErrorCode::ModifierNotAttached,

            7001 => ErrorCode::TableNotFound,
            7002 => ErrorCode::TableNumberExists,
            7003 => ErrorCode::TableInactive,
            7101 => ErrorCode::QrTokenInvalid,
            7102 => ErrorCode::QrTokenMissing,

            9001 => ErrorCode::InternalError,

            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

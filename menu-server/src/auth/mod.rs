//! Request authentication
//!
//! - [`staff_auth`]: staff JWT for the admin API
//! - [`qr_guard`]: table QR token for guest routes

pub mod qr_guard;
pub mod staff_auth;

pub use qr_guard::{QR_TOKEN_HEADER, qr_guard_middleware};
pub use staff_auth::{StaffIdentity, staff_auth_middleware};

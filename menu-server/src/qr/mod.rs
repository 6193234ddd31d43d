//! Table access tokens
//!
//! - [`token`]: HS256 signing and decoding of table QR tokens
//! - [`service`]: issue / invalidate / verify against the stored current token

pub mod service;
pub mod token;

pub use service::{InvalidReason, QrService, QrVerification};
pub use token::{QrClaims, QrTokenError, QrTokenSigner};

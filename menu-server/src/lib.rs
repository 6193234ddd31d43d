//! menu-server: restaurant table QR access and menu administration
//!
//! - Table admin with single-slot QR access tokens (issue, revoke, verify)
//! - Modifier groups with selection constraints, attached to menu items
//! - Guest menu gated by a verified table token

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod modifiers;
pub mod qr;
pub mod state;
pub mod tables;
pub mod util;
pub mod validation;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub use config::Config;
pub use state::AppState;

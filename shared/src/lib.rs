//! Shared types for the table-ordering platform
//!
//! Error codes and API response structures, domain models for tables,
//! modifiers and menu items, and small utility functions used by
//! `menu-server` and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

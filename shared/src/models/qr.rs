//! QR access token payloads

use serde::{Deserialize, Serialize};

/// Result of issuing (or regenerating) a table token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub table_number: i32,
}

/// Per-table outcome of a bulk regeneration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegeneratedToken {
    pub table_id: i64,
    pub table_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateAllResult {
    pub total: usize,
    pub results: Vec<RegeneratedToken>,
}

/// Verified table access attached to guest requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAccess {
    pub table_id: i64,
    pub table_number: i32,
    pub restaurant_id: i64,
}

/// Body returned by `GET /qr/verify` on success
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrVerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

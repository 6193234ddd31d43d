//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table availability for guest ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "table_status", rename_all = "lowercase"))]
pub enum TableStatus {
    #[default]
    Active,
    Inactive,
}

impl TableStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TableStatus::Active)
    }
}

/// Dining table entity
///
/// `qr_token` holds the single currently valid access token. It is
/// overwritten on every issue and cleared on deactivation or removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_number: i32,
    pub capacity: i32,
    pub location: String,
    pub description: Option<String>,
    pub status: TableStatus,
    pub qr_token: Option<String>,
    pub qr_token_created_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i32,
    pub capacity: i32,
    pub location: String,
    pub description: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}

/// Sort column for table listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSort {
    #[default]
    TableNumber,
    Capacity,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

/// Table listing filters (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableQuery {
    pub status: Option<TableStatus>,
    pub location: Option<String>,
    #[serde(default)]
    pub sort: TableSort,
    #[serde(default)]
    pub order: SortOrder,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One page of tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePage {
    pub items: Vec<DiningTable>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

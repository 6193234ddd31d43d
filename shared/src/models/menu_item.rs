//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dining_table::SortOrder;
use super::modifier::ModifierGroup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "menu_item_status", rename_all = "snake_case"))]
pub enum MenuItemStatus {
    #[default]
    Available,
    Unavailable,
    SoldOut,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: MenuItemStatus,
    pub is_chef_recommended: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: Option<MenuItemStatus>,
    pub is_chef_recommended: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MenuItemStatusUpdate {
    pub status: MenuItemStatus,
}

/// Menu item as shown to a seated guest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestMenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_chef_recommended: bool,
    /// Active groups only, each carrying only its active options
    pub modifier_groups: Vec<ModifierGroup>,
}

/// Sort column for the guest menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuestMenuSort {
    Price,
    #[default]
    CreatedAt,
}

/// Guest menu filters (query string)
///
/// Newest items first unless `order` says otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestMenuQuery {
    /// Case-insensitive substring of the item name
    pub q: Option<String>,
    #[serde(alias = "chefRecommended")]
    pub chef_recommended: Option<bool>,
    #[serde(default)]
    pub sort: GuestMenuSort,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Guest menu scoped to the table the QR token was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestMenu {
    pub table_id: i64,
    pub table_number: i32,
    pub items: Vec<GuestMenuItem>,
    /// Items matching the filters across all pages
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

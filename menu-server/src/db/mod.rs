//! Database access layer
//!
//! Services talk to storage through the repository traits below. Two
//! implementations exist:
//! - [`PgStore`]: PostgreSQL via sqlx (production)
//! - [`MemoryStore`]: in-process maps behind a lock (tests, local demos)
//!
//! Every method is scoped by `restaurant_id` where the row carries one.
//! Soft-deleted tables and items are invisible to all reads.

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, GuestMenuQuery, MenuItem, MenuItemCreate,
    MenuItemStatus, ModifierGroup, ModifierOption, ModifierStatus, SelectionType, SortOrder,
    TableQuery, TableStatus,
};
use thiserror::Error;

use crate::BoxError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(BoxError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.constraint().unwrap_or("unique").to_string());
        }
        RepoError::Database(err.into())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Validated modifier group fields, written as a whole on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub selection_type: SelectionType,
    pub is_required: bool,
    pub min_selections: Option<i32>,
    pub max_selections: Option<i32>,
    pub display_order: i32,
    pub status: ModifierStatus,
}

/// Validated modifier option fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub name: String,
    pub price_adjustment: Decimal,
    pub status: ModifierStatus,
}

/// Staff account (admin dashboard user)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i64,
    pub restaurant_id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: i64,
}

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert an active table without a token. `Duplicate` when the number is taken.
    async fn create_table(
        &self,
        restaurant_id: i64,
        data: &DiningTableCreate,
    ) -> RepoResult<DiningTable>;

    async fn find_table(&self, restaurant_id: i64, table_id: i64)
    -> RepoResult<Option<DiningTable>>;

    /// One page of tables plus the total count matching the filters
    async fn list_tables(
        &self,
        restaurant_id: i64,
        query: &TableQuery,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<DiningTable>, i64)>;

    /// Active, non-deleted tables ordered by number
    async fn list_active_tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>>;

    async fn update_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        data: &DiningTableUpdate,
    ) -> RepoResult<DiningTable>;

    /// Deactivation clears the stored token in the same write
    async fn set_table_status(
        &self,
        restaurant_id: i64,
        table_id: i64,
        status: TableStatus,
    ) -> RepoResult<DiningTable>;

    /// Overwrite the table's single current token. Only active tables accept
    /// a token; `false` when the table is missing, deleted or inactive.
    async fn set_qr_token(
        &self,
        restaurant_id: i64,
        table_id: i64,
        token: &str,
        now: i64,
    ) -> RepoResult<bool>;

    /// Set `deleted_at` and clear the token
    async fn soft_delete_table(&self, restaurant_id: i64, table_id: i64, now: i64)
    -> RepoResult<()>;
}

#[async_trait]
pub trait ModifierStore: Send + Sync {
    async fn create_group(&self, restaurant_id: i64, record: &GroupRecord)
    -> RepoResult<ModifierGroup>;

    async fn update_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
        record: &GroupRecord,
    ) -> RepoResult<ModifierGroup>;

    /// Group with its options embedded
    async fn find_group(&self, restaurant_id: i64, group_id: i64)
    -> RepoResult<Option<ModifierGroup>>;

    /// All groups by display order, options embedded
    async fn list_groups(&self, restaurant_id: i64) -> RepoResult<Vec<ModifierGroup>>;

    /// Ids among `group_ids` that exist for the restaurant
    async fn existing_group_ids(&self, restaurant_id: i64, group_ids: &[i64]) -> RepoResult<Vec<i64>>;

    /// Remove item attachments, options and the group in one transaction
    async fn delete_group(&self, restaurant_id: i64, group_id: i64) -> RepoResult<()>;

    /// Options of any status
    async fn count_options(&self, group_id: i64) -> RepoResult<i64>;

    async fn create_option(&self, group_id: i64, record: &OptionRecord)
    -> RepoResult<ModifierOption>;

    /// Option whose group belongs to the restaurant
    async fn find_option(&self, restaurant_id: i64, option_id: i64)
    -> RepoResult<Option<ModifierOption>>;

    async fn update_option(&self, option_id: i64, record: &OptionRecord)
    -> RepoResult<ModifierOption>;

    /// Replace the item's attachment set in one transaction
    async fn replace_item_groups(&self, item_id: i64, group_ids: &[i64]) -> RepoResult<()>;

    /// `false` when the link did not exist
    async fn detach_item_group(&self, item_id: i64, group_id: i64) -> RepoResult<bool>;

    /// Attached groups by display order, options embedded
    async fn list_item_groups(&self, item_id: i64) -> RepoResult<Vec<ModifierGroup>>;

    /// Attached groups for many items at once, keyed by item id. Items
    /// without attachments are absent from the map.
    async fn list_groups_for_items(
        &self,
        item_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<ModifierGroup>>>;
}

#[async_trait]
pub trait MenuItemStore: Send + Sync {
    async fn create_item(&self, restaurant_id: i64, data: &MenuItemCreate) -> RepoResult<MenuItem>;

    async fn find_item(&self, restaurant_id: i64, item_id: i64) -> RepoResult<Option<MenuItem>>;

    async fn list_items(&self, restaurant_id: i64) -> RepoResult<Vec<MenuItem>>;

    /// One page of available items matching the guest filters, plus the
    /// total count across pages
    async fn list_available_items(
        &self,
        restaurant_id: i64,
        query: &GuestMenuQuery,
        order: SortOrder,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<MenuItem>, i64)>;

    async fn set_item_status(
        &self,
        restaurant_id: i64,
        item_id: i64,
        status: MenuItemStatus,
    ) -> RepoResult<MenuItem>;

    /// Flag the item deleted and drop its attachments
    async fn soft_delete_item(&self, restaurant_id: i64, item_id: i64, now: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn find_staff_by_email(&self, email: &str) -> RepoResult<Option<Staff>>;

    async fn create_staff(
        &self,
        restaurant_id: i64,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> RepoResult<Staff>;
}

/// Everything the services need from storage
pub trait Store: TableStore + ModifierStore + MenuItemStore + StaffStore {}

impl<T: TableStore + ModifierStore + MenuItemStore + StaffStore> Store for T {}

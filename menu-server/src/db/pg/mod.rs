//! PostgreSQL store
//!
//! Queries live as free functions per entity; [`PgStore`] wires them to
//! the repository traits.

pub mod dining_table;
pub mod menu_item;
pub mod modifier;
pub mod staff;

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, GuestMenuQuery, MenuItem, MenuItemCreate,
    MenuItemStatus, ModifierGroup, ModifierOption, SortOrder, TableQuery, TableStatus,
};
use sqlx::PgPool;

use super::{
    GroupRecord, MenuItemStore, ModifierStore, OptionRecord, RepoResult, Staff, StaffStore,
    TableStore,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TableStore for PgStore {
    async fn create_table(
        &self,
        restaurant_id: i64,
        data: &DiningTableCreate,
    ) -> RepoResult<DiningTable> {
        dining_table::create_table(&self.pool, restaurant_id, data).await
    }

    async fn find_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
    ) -> RepoResult<Option<DiningTable>> {
        dining_table::find_table(&self.pool, restaurant_id, table_id).await
    }

    async fn list_tables(
        &self,
        restaurant_id: i64,
        query: &TableQuery,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<DiningTable>, i64)> {
        dining_table::list_tables(&self.pool, restaurant_id, query, offset, limit).await
    }

    async fn list_active_tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
        dining_table::list_active_tables(&self.pool, restaurant_id).await
    }

    async fn update_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        data: &DiningTableUpdate,
    ) -> RepoResult<DiningTable> {
        dining_table::update_table(&self.pool, restaurant_id, table_id, data).await
    }

    async fn set_table_status(
        &self,
        restaurant_id: i64,
        table_id: i64,
        status: TableStatus,
    ) -> RepoResult<DiningTable> {
        dining_table::set_table_status(&self.pool, restaurant_id, table_id, status).await
    }

    async fn set_qr_token(
        &self,
        restaurant_id: i64,
        table_id: i64,
        token: &str,
        now: i64,
    ) -> RepoResult<bool> {
        dining_table::set_qr_token(&self.pool, restaurant_id, table_id, token, now).await
    }

    async fn soft_delete_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        now: i64,
    ) -> RepoResult<()> {
        dining_table::soft_delete_table(&self.pool, restaurant_id, table_id, now).await
    }
}

#[async_trait]
impl ModifierStore for PgStore {
    async fn create_group(
        &self,
        restaurant_id: i64,
        record: &GroupRecord,
    ) -> RepoResult<ModifierGroup> {
        modifier::create_group(&self.pool, restaurant_id, record).await
    }

    async fn update_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
        record: &GroupRecord,
    ) -> RepoResult<ModifierGroup> {
        modifier::update_group(&self.pool, restaurant_id, group_id, record).await
    }

    async fn find_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
    ) -> RepoResult<Option<ModifierGroup>> {
        modifier::find_group(&self.pool, restaurant_id, group_id).await
    }

    async fn list_groups(&self, restaurant_id: i64) -> RepoResult<Vec<ModifierGroup>> {
        modifier::list_groups(&self.pool, restaurant_id).await
    }

    async fn existing_group_ids(
        &self,
        restaurant_id: i64,
        group_ids: &[i64],
    ) -> RepoResult<Vec<i64>> {
        modifier::existing_group_ids(&self.pool, restaurant_id, group_ids).await
    }

    async fn delete_group(&self, restaurant_id: i64, group_id: i64) -> RepoResult<()> {
        modifier::delete_group(&self.pool, restaurant_id, group_id).await
    }

    async fn count_options(&self, group_id: i64) -> RepoResult<i64> {
        modifier::count_options(&self.pool, group_id).await
    }

    async fn create_option(
        &self,
        group_id: i64,
        record: &OptionRecord,
    ) -> RepoResult<ModifierOption> {
        modifier::create_option(&self.pool, group_id, record).await
    }

    async fn find_option(
        &self,
        restaurant_id: i64,
        option_id: i64,
    ) -> RepoResult<Option<ModifierOption>> {
        modifier::find_option(&self.pool, restaurant_id, option_id).await
    }

    async fn update_option(
        &self,
        option_id: i64,
        record: &OptionRecord,
    ) -> RepoResult<ModifierOption> {
        modifier::update_option(&self.pool, option_id, record).await
    }

    async fn replace_item_groups(&self, item_id: i64, group_ids: &[i64]) -> RepoResult<()> {
        modifier::replace_item_groups(&self.pool, item_id, group_ids).await
    }

    async fn detach_item_group(&self, item_id: i64, group_id: i64) -> RepoResult<bool> {
        modifier::detach_item_group(&self.pool, item_id, group_id).await
    }

    async fn list_item_groups(&self, item_id: i64) -> RepoResult<Vec<ModifierGroup>> {
        modifier::list_item_groups(&self.pool, item_id).await
    }

    async fn list_groups_for_items(
        &self,
        item_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<ModifierGroup>>> {
        modifier::list_groups_for_items(&self.pool, item_ids).await
    }
}

#[async_trait]
impl MenuItemStore for PgStore {
    async fn create_item(&self, restaurant_id: i64, data: &MenuItemCreate) -> RepoResult<MenuItem> {
        menu_item::create_item(&self.pool, restaurant_id, data).await
    }

    async fn find_item(&self, restaurant_id: i64, item_id: i64) -> RepoResult<Option<MenuItem>> {
        menu_item::find_item(&self.pool, restaurant_id, item_id).await
    }

    async fn list_items(&self, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
        menu_item::list_items(&self.pool, restaurant_id).await
    }

    async fn list_available_items(
        &self,
        restaurant_id: i64,
        query: &GuestMenuQuery,
        order: SortOrder,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<MenuItem>, i64)> {
        menu_item::list_available_items(&self.pool, restaurant_id, query, order, offset, limit)
            .await
    }

    async fn set_item_status(
        &self,
        restaurant_id: i64,
        item_id: i64,
        status: MenuItemStatus,
    ) -> RepoResult<MenuItem> {
        menu_item::set_item_status(&self.pool, restaurant_id, item_id, status).await
    }

    async fn soft_delete_item(&self, restaurant_id: i64, item_id: i64, now: i64) -> RepoResult<()> {
        menu_item::soft_delete_item(&self.pool, restaurant_id, item_id, now).await
    }
}

#[async_trait]
impl StaffStore for PgStore {
    async fn find_staff_by_email(&self, email: &str) -> RepoResult<Option<Staff>> {
        staff::find_by_email(&self.pool, email).await
    }

    async fn create_staff(
        &self,
        restaurant_id: i64,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> RepoResult<Staff> {
        staff::create(&self.pool, restaurant_id, email, password_hash, name).await
    }
}

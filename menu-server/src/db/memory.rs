//! In-memory store
//!
//! Mirrors [`super::PgStore`] semantics over plain maps so services and
//! routes can be exercised without a database.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, GuestMenuQuery, GuestMenuSort, MenuItem,
    MenuItemCreate, MenuItemStatus, ModifierGroup, ModifierOption, SortOrder, TableQuery,
    TableSort, TableStatus,
};

use super::{
    GroupRecord, MenuItemStore, ModifierStore, OptionRecord, RepoError, RepoResult, Staff,
    StaffStore, TableStore,
};

#[derive(Default)]
struct Inner {
    tables: BTreeMap<i64, DiningTable>,
    groups: BTreeMap<i64, ModifierGroup>,
    options: BTreeMap<i64, ModifierOption>,
    items: BTreeMap<i64, MenuItem>,
    /// (menu_item_id, modifier_group_id)
    links: BTreeSet<(i64, i64)>,
    staff: HashMap<String, Staff>,
}

impl Inner {
    fn live_table_mut(&mut self, restaurant_id: i64, table_id: i64) -> RepoResult<&mut DiningTable> {
        self.tables
            .get_mut(&table_id)
            .filter(|t| t.restaurant_id == restaurant_id && t.deleted_at.is_none())
            .ok_or_else(|| RepoError::NotFound(format!("dining table {table_id}")))
    }

    fn live_item_mut(&mut self, restaurant_id: i64, item_id: i64) -> RepoResult<&mut MenuItem> {
        self.items
            .get_mut(&item_id)
            .filter(|i| i.restaurant_id == restaurant_id && !i.is_deleted)
            .ok_or_else(|| RepoError::NotFound(format!("menu item {item_id}")))
    }

    fn number_taken(&self, restaurant_id: i64, table_number: i32, except: Option<i64>) -> bool {
        self.tables.values().any(|t| {
            t.restaurant_id == restaurant_id
                && t.table_number == table_number
                && t.deleted_at.is_none()
                && Some(t.id) != except
        })
    }

    fn group_with_options(&self, group: &ModifierGroup) -> ModifierGroup {
        let mut group = group.clone();
        group.options = self
            .options
            .values()
            .filter(|o| o.group_id == group.id)
            .cloned()
            .collect();
        group
    }

    fn sorted_groups<'a>(&self, groups: impl Iterator<Item = &'a ModifierGroup>) -> Vec<ModifierGroup> {
        let mut groups: Vec<ModifierGroup> = groups.map(|g| self.group_with_options(g)).collect();
        groups.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        groups
    }

    fn item_groups(&self, item_id: i64) -> Vec<ModifierGroup> {
        self.sorted_groups(
            self.links
                .iter()
                .filter(|(i, _)| *i == item_id)
                .filter_map(|(_, g)| self.groups.get(g)),
        )
    }
}

/// Map-backed store for tests and local runs
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_id: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryStore")
            .field("tables", &inner.tables.len())
            .field("groups", &inner.groups.len())
            .field("items", &inner.items.len())
            .finish()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn create_table(
        &self,
        restaurant_id: i64,
        data: &DiningTableCreate,
    ) -> RepoResult<DiningTable> {
        let mut inner = self.inner.write();
        if inner.number_taken(restaurant_id, data.table_number, None) {
            return Err(RepoError::Duplicate("dining_tables_number_unique".into()));
        }
        let now = shared::util::now_millis();
        let table = DiningTable {
            id: self.next_id(),
            restaurant_id,
            table_number: data.table_number,
            capacity: data.capacity,
            location: data.location.clone(),
            description: data.description.clone(),
            status: TableStatus::Active,
            qr_token: None,
            qr_token_created_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.tables.insert(table.id, table.clone());
        Ok(table)
    }

    async fn find_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
    ) -> RepoResult<Option<DiningTable>> {
        let inner = self.inner.read();
        Ok(inner
            .tables
            .get(&table_id)
            .filter(|t| t.restaurant_id == restaurant_id && t.deleted_at.is_none())
            .cloned())
    }

    async fn list_tables(
        &self,
        restaurant_id: i64,
        query: &TableQuery,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<DiningTable>, i64)> {
        let inner = self.inner.read();
        let mut rows: Vec<DiningTable> = inner
            .tables
            .values()
            .filter(|t| t.restaurant_id == restaurant_id && t.deleted_at.is_none())
            .filter(|t| query.status.is_none_or(|s| t.status == s))
            .filter(|t| query.location.as_ref().is_none_or(|l| &t.location == l))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let primary = match query.sort {
                TableSort::TableNumber => a.table_number.cmp(&b.table_number),
                TableSort::Capacity => a.capacity.cmp(&b.capacity),
                TableSort::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            let primary = match query.order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_active_tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
        let inner = self.inner.read();
        let mut rows: Vec<DiningTable> = inner
            .tables
            .values()
            .filter(|t| {
                t.restaurant_id == restaurant_id && t.deleted_at.is_none() && t.status.is_active()
            })
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.table_number);
        Ok(rows)
    }

    async fn update_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        data: &DiningTableUpdate,
    ) -> RepoResult<DiningTable> {
        let mut inner = self.inner.write();
        if let Some(number) = data.table_number
            && inner.number_taken(restaurant_id, number, Some(table_id))
        {
            return Err(RepoError::Duplicate("dining_tables_number_unique".into()));
        }
        let table = inner.live_table_mut(restaurant_id, table_id)?;
        if let Some(number) = data.table_number {
            table.table_number = number;
        }
        if let Some(capacity) = data.capacity {
            table.capacity = capacity;
        }
        if let Some(location) = &data.location {
            table.location = location.clone();
        }
        if let Some(description) = &data.description {
            table.description = Some(description.clone());
        }
        table.updated_at = shared::util::now_millis();
        Ok(table.clone())
    }

    async fn set_table_status(
        &self,
        restaurant_id: i64,
        table_id: i64,
        status: TableStatus,
    ) -> RepoResult<DiningTable> {
        let mut inner = self.inner.write();
        let table = inner.live_table_mut(restaurant_id, table_id)?;
        table.status = status;
        if status == TableStatus::Inactive {
            table.qr_token = None;
            table.qr_token_created_at = None;
        }
        table.updated_at = shared::util::now_millis();
        Ok(table.clone())
    }

    async fn set_qr_token(
        &self,
        restaurant_id: i64,
        table_id: i64,
        token: &str,
        now: i64,
    ) -> RepoResult<bool> {
        let mut inner = self.inner.write();
        let Ok(table) = inner.live_table_mut(restaurant_id, table_id) else {
            return Ok(false);
        };
        if !table.status.is_active() {
            return Ok(false);
        }
        table.qr_token = Some(token.to_string());
        table.qr_token_created_at = Some(now);
        table.updated_at = now;
        Ok(true)
    }

    async fn soft_delete_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        now: i64,
    ) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let table = inner.live_table_mut(restaurant_id, table_id)?;
        table.deleted_at = Some(now);
        table.qr_token = None;
        table.qr_token_created_at = None;
        table.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl ModifierStore for MemoryStore {
    async fn create_group(
        &self,
        restaurant_id: i64,
        record: &GroupRecord,
    ) -> RepoResult<ModifierGroup> {
        let now = shared::util::now_millis();
        let group = ModifierGroup {
            id: self.next_id(),
            restaurant_id,
            name: record.name.clone(),
            selection_type: record.selection_type,
            is_required: record.is_required,
            min_selections: record.min_selections,
            max_selections: record.max_selections,
            display_order: record.display_order,
            status: record.status,
            created_at: now,
            updated_at: now,
            options: Vec::new(),
        };
        self.inner.write().groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn update_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
        record: &GroupRecord,
    ) -> RepoResult<ModifierGroup> {
        let mut inner = self.inner.write();
        let group = inner
            .groups
            .get_mut(&group_id)
            .filter(|g| g.restaurant_id == restaurant_id)
            .ok_or_else(|| RepoError::NotFound(format!("modifier group {group_id}")))?;
        group.name = record.name.clone();
        group.selection_type = record.selection_type;
        group.is_required = record.is_required;
        group.min_selections = record.min_selections;
        group.max_selections = record.max_selections;
        group.display_order = record.display_order;
        group.status = record.status;
        group.updated_at = shared::util::now_millis();
        let group = group.clone();
        Ok(inner.group_with_options(&group))
    }

    async fn find_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
    ) -> RepoResult<Option<ModifierGroup>> {
        let inner = self.inner.read();
        Ok(inner
            .groups
            .get(&group_id)
            .filter(|g| g.restaurant_id == restaurant_id)
            .map(|g| inner.group_with_options(g)))
    }

    async fn list_groups(&self, restaurant_id: i64) -> RepoResult<Vec<ModifierGroup>> {
        let inner = self.inner.read();
        Ok(inner.sorted_groups(
            inner
                .groups
                .values()
                .filter(|g| g.restaurant_id == restaurant_id),
        ))
    }

    async fn existing_group_ids(
        &self,
        restaurant_id: i64,
        group_ids: &[i64],
    ) -> RepoResult<Vec<i64>> {
        let inner = self.inner.read();
        Ok(group_ids
            .iter()
            .copied()
            .filter(|id| {
                inner
                    .groups
                    .get(id)
                    .is_some_and(|g| g.restaurant_id == restaurant_id)
            })
            .collect())
    }

    async fn delete_group(&self, restaurant_id: i64, group_id: i64) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let owned = inner
            .groups
            .get(&group_id)
            .is_some_and(|g| g.restaurant_id == restaurant_id);
        if !owned {
            return Err(RepoError::NotFound(format!("modifier group {group_id}")));
        }
        inner.links.retain(|(_, g)| *g != group_id);
        inner.options.retain(|_, o| o.group_id != group_id);
        inner.groups.remove(&group_id);
        Ok(())
    }

    async fn count_options(&self, group_id: i64) -> RepoResult<i64> {
        let inner = self.inner.read();
        Ok(inner
            .options
            .values()
            .filter(|o| o.group_id == group_id)
            .count() as i64)
    }

    async fn create_option(
        &self,
        group_id: i64,
        record: &OptionRecord,
    ) -> RepoResult<ModifierOption> {
        let mut inner = self.inner.write();
        if !inner.groups.contains_key(&group_id) {
            return Err(RepoError::NotFound(format!("modifier group {group_id}")));
        }
        let option = ModifierOption {
            id: self.next_id(),
            group_id,
            name: record.name.clone(),
            price_adjustment: record.price_adjustment,
            status: record.status,
            created_at: shared::util::now_millis(),
        };
        inner.options.insert(option.id, option.clone());
        Ok(option)
    }

    async fn find_option(
        &self,
        restaurant_id: i64,
        option_id: i64,
    ) -> RepoResult<Option<ModifierOption>> {
        let inner = self.inner.read();
        Ok(inner
            .options
            .get(&option_id)
            .filter(|o| {
                inner
                    .groups
                    .get(&o.group_id)
                    .is_some_and(|g| g.restaurant_id == restaurant_id)
            })
            .cloned())
    }

    async fn update_option(
        &self,
        option_id: i64,
        record: &OptionRecord,
    ) -> RepoResult<ModifierOption> {
        let mut inner = self.inner.write();
        let option = inner
            .options
            .get_mut(&option_id)
            .ok_or_else(|| RepoError::NotFound(format!("modifier option {option_id}")))?;
        option.name = record.name.clone();
        option.price_adjustment = record.price_adjustment;
        option.status = record.status;
        Ok(option.clone())
    }

    async fn replace_item_groups(&self, item_id: i64, group_ids: &[i64]) -> RepoResult<()> {
        let mut inner = self.inner.write();
        inner.links.retain(|(i, _)| *i != item_id);
        inner
            .links
            .extend(group_ids.iter().map(|g| (item_id, *g)));
        Ok(())
    }

    async fn detach_item_group(&self, item_id: i64, group_id: i64) -> RepoResult<bool> {
        Ok(self.inner.write().links.remove(&(item_id, group_id)))
    }

    async fn list_item_groups(&self, item_id: i64) -> RepoResult<Vec<ModifierGroup>> {
        let inner = self.inner.read();
        Ok(inner.item_groups(item_id))
    }

    async fn list_groups_for_items(
        &self,
        item_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<ModifierGroup>>> {
        let inner = self.inner.read();
        Ok(item_ids
            .iter()
            .map(|id| (*id, inner.item_groups(*id)))
            .filter(|(_, groups)| !groups.is_empty())
            .collect())
    }
}

#[async_trait]
impl MenuItemStore for MemoryStore {
    async fn create_item(&self, restaurant_id: i64, data: &MenuItemCreate) -> RepoResult<MenuItem> {
        let now = shared::util::now_millis();
        let item = MenuItem {
            id: self.next_id(),
            restaurant_id,
            name: data.name.clone(),
            description: data.description.clone(),
            price: data.price,
            status: data.status.unwrap_or_default(),
            is_chef_recommended: data.is_chef_recommended.unwrap_or(false),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, restaurant_id: i64, item_id: i64) -> RepoResult<Option<MenuItem>> {
        let inner = self.inner.read();
        Ok(inner
            .items
            .get(&item_id)
            .filter(|i| i.restaurant_id == restaurant_id && !i.is_deleted)
            .cloned())
    }

    async fn list_items(&self, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
        let inner = self.inner.read();
        let mut rows: Vec<MenuItem> = inner
            .items
            .values()
            .filter(|i| i.restaurant_id == restaurant_id && !i.is_deleted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn list_available_items(
        &self,
        restaurant_id: i64,
        query: &GuestMenuQuery,
        order: SortOrder,
        offset: i64,
        limit: i64,
    ) -> RepoResult<(Vec<MenuItem>, i64)> {
        let search = query
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let inner = self.inner.read();
        let mut rows: Vec<MenuItem> = inner
            .items
            .values()
            .filter(|i| {
                i.restaurant_id == restaurant_id
                    && !i.is_deleted
                    && i.status == MenuItemStatus::Available
            })
            .filter(|i| {
                search
                    .as_ref()
                    .is_none_or(|q| i.name.to_lowercase().contains(q.as_str()))
            })
            .filter(|i| {
                query
                    .chef_recommended
                    .is_none_or(|c| i.is_chef_recommended == c)
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let primary = match query.sort {
                GuestMenuSort::Price => a.price.cmp(&b.price),
                GuestMenuSort::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            let primary = match order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn set_item_status(
        &self,
        restaurant_id: i64,
        item_id: i64,
        status: MenuItemStatus,
    ) -> RepoResult<MenuItem> {
        let mut inner = self.inner.write();
        let item = inner.live_item_mut(restaurant_id, item_id)?;
        item.status = status;
        item.updated_at = shared::util::now_millis();
        Ok(item.clone())
    }

    async fn soft_delete_item(&self, restaurant_id: i64, item_id: i64, now: i64) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let item = inner.live_item_mut(restaurant_id, item_id)?;
        item.is_deleted = true;
        item.updated_at = now;
        inner.links.retain(|(i, _)| *i != item_id);
        Ok(())
    }
}

#[async_trait]
impl StaffStore for MemoryStore {
    async fn find_staff_by_email(&self, email: &str) -> RepoResult<Option<Staff>> {
        Ok(self.inner.read().staff.get(email).cloned())
    }

    async fn create_staff(
        &self,
        restaurant_id: i64,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> RepoResult<Staff> {
        let mut inner = self.inner.write();
        if inner.staff.contains_key(email) {
            return Err(RepoError::Duplicate("staff_email_key".into()));
        }
        let staff = Staff {
            id: self.next_id(),
            restaurant_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.map(str::to_string),
            created_at: shared::util::now_millis(),
        };
        inner.staff.insert(staff.email.clone(), staff.clone());
        Ok(staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{ModifierStatus, SelectionType};

    fn table(number: i32) -> DiningTableCreate {
        DiningTableCreate {
            table_number: number,
            capacity: 4,
            location: "Patio".into(),
            description: None,
        }
    }

    fn group(name: &str, display_order: i32) -> GroupRecord {
        GroupRecord {
            name: name.into(),
            selection_type: SelectionType::Single,
            is_required: false,
            min_selections: None,
            max_selections: None,
            display_order,
            status: ModifierStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_duplicate_table_number() {
        let store = MemoryStore::new();
        store.create_table(1, &table(5)).await.unwrap();

        let err = store.create_table(1, &table(5)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // Other restaurants have their own numbering
        assert!(store.create_table(2, &table(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_number_reusable_after_soft_delete() {
        let store = MemoryStore::new();
        let t = store.create_table(1, &table(5)).await.unwrap();
        store.soft_delete_table(1, t.id, 100).await.unwrap();

        assert!(store.find_table(1, t.id).await.unwrap().is_none());
        assert!(store.create_table(1, &table(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_soft_delete_clears_token() {
        let store = MemoryStore::new();
        let t = store.create_table(1, &table(3)).await.unwrap();
        assert!(store.set_qr_token(1, t.id, "tok", 10).await.unwrap());

        store.soft_delete_table(1, t.id, 20).await.unwrap();
        let raw = store.inner.read().tables.get(&t.id).cloned().unwrap();
        assert_eq!(raw.qr_token, None);
        assert_eq!(raw.deleted_at, Some(20));
    }

    #[tokio::test]
    async fn test_deactivate_clears_token() {
        let store = MemoryStore::new();
        let t = store.create_table(1, &table(3)).await.unwrap();
        assert!(store.set_qr_token(1, t.id, "tok", 10).await.unwrap());

        let inactive = store
            .set_table_status(1, t.id, TableStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(inactive.qr_token, None);
        assert_eq!(inactive.qr_token_created_at, None);
    }

    #[tokio::test]
    async fn test_token_rejected_on_inactive_table() {
        let store = MemoryStore::new();
        let t = store.create_table(1, &table(3)).await.unwrap();
        store
            .set_table_status(1, t.id, TableStatus::Inactive)
            .await
            .unwrap();

        assert!(!store.set_qr_token(1, t.id, "tok", 10).await.unwrap());
        assert!(!store.set_qr_token(1, 999, "tok", 10).await.unwrap());

        let active = store
            .set_table_status(1, t.id, TableStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.qr_token, None);
    }

    #[tokio::test]
    async fn test_list_tables_filters_and_pages() {
        let store = MemoryStore::new();
        for n in [3, 1, 2, 4] {
            store.create_table(1, &table(n)).await.unwrap();
        }
        let inside = DiningTableCreate {
            location: "Inside".into(),
            ..table(9)
        };
        store.create_table(1, &inside).await.unwrap();

        let query = TableQuery {
            location: Some("Patio".into()),
            order: SortOrder::Desc,
            ..Default::default()
        };
        let (rows, total) = store.list_tables(1, &query, 1, 2).await.unwrap();
        assert_eq!(total, 4);
        let numbers: Vec<i32> = rows.iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_delete_group_cascades() {
        let store = MemoryStore::new();
        let g = store.create_group(1, &group("Size", 0)).await.unwrap();
        let record = OptionRecord {
            name: "Large".into(),
            price_adjustment: Decimal::new(150, 2),
            status: ModifierStatus::Active,
        };
        store.create_option(g.id, &record).await.unwrap();
        store.replace_item_groups(77, &[g.id]).await.unwrap();

        store.delete_group(1, g.id).await.unwrap();
        assert_eq!(store.count_options(g.id).await.unwrap(), 0);
        assert!(store.list_item_groups(77).await.unwrap().is_empty());
        assert!(matches!(
            store.delete_group(1, g.id).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_item_groups_ordered_by_display_order() {
        let store = MemoryStore::new();
        let late = store.create_group(1, &group("Sauce", 5)).await.unwrap();
        let early = store.create_group(1, &group("Size", 1)).await.unwrap();
        store
            .replace_item_groups(10, &[late.id, early.id])
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_item_groups(10)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Size", "Sauce"]);
    }

    #[tokio::test]
    async fn test_groups_for_items_batch() {
        let store = MemoryStore::new();
        let size = store.create_group(1, &group("Size", 1)).await.unwrap();
        let sauce = store.create_group(1, &group("Sauce", 0)).await.unwrap();
        store.replace_item_groups(10, &[size.id, sauce.id]).await.unwrap();
        store.replace_item_groups(11, &[size.id]).await.unwrap();

        let map = store.list_groups_for_items(&[10, 11, 12]).await.unwrap();
        let names = |id: i64| -> Vec<String> { map[&id].iter().map(|g| g.name.clone()).collect() };
        assert_eq!(names(10), vec!["Sauce", "Size"]);
        assert_eq!(names(11), vec!["Size"]);
        assert!(!map.contains_key(&12));
    }

    #[tokio::test]
    async fn test_available_items_filter_and_sort() {
        let store = MemoryStore::new();
        for (name, cents, chef, status) in [
            ("Veggie Burger", 1200, false, MenuItemStatus::Available),
            ("Smash Burger", 1450, true, MenuItemStatus::Available),
            ("Fish Burger", 1300, false, MenuItemStatus::SoldOut),
            ("Onion Rings", 500, true, MenuItemStatus::Available),
        ] {
            let data = MenuItemCreate {
                name: name.into(),
                description: None,
                price: Decimal::new(cents, 2),
                status: Some(status),
                is_chef_recommended: Some(chef),
            };
            store.create_item(1, &data).await.unwrap();
        }

        let query = GuestMenuQuery {
            q: Some(" burger ".into()),
            sort: GuestMenuSort::Price,
            ..Default::default()
        };
        let (rows, total) = store
            .list_available_items(1, &query, SortOrder::Desc, 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 2);
        let names: Vec<&str> = rows.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Smash Burger", "Veggie Burger"]);

        let query = GuestMenuQuery {
            chef_recommended: Some(true),
            sort: GuestMenuSort::Price,
            ..Default::default()
        };
        let (rows, total) = store
            .list_available_items(1, &query, SortOrder::Asc, 1, 1)
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Smash Burger");
    }

    #[tokio::test]
    async fn test_groups_scoped_by_restaurant() {
        let store = MemoryStore::new();
        let g = store.create_group(1, &group("Size", 0)).await.unwrap();

        assert!(store.find_group(2, g.id).await.unwrap().is_none());
        assert!(store.existing_group_ids(2, &[g.id]).await.unwrap().is_empty());
        assert_eq!(store.existing_group_ids(1, &[g.id, 999]).await.unwrap(), vec![g.id]);
    }
}

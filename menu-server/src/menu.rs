//! Menu item administration and the guest menu

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    GuestMenu, GuestMenuItem, GuestMenuQuery, MenuItem, MenuItemCreate, MenuItemStatus, SortOrder,
    TableAccess,
};

use crate::db::Store;
use crate::error::ServiceResult;
use crate::tables::MAX_PAGE_LIMIT;
use crate::validation::{
    MAX_ITEM_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

pub const GUEST_MENU_DEFAULT_LIMIT: u32 = 20;

#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn Store>,
}

impl MenuService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_item(
        &self,
        restaurant_id: i64,
        mut data: MenuItemCreate,
    ) -> ServiceResult<MenuItem> {
        validate_required_text(&data.name, "name", MAX_ITEM_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        if data.price < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).into());
        }
        data.name = data.name.trim().to_string();

        let item = self.store.create_item(restaurant_id, &data).await?;
        tracing::info!(item_id = item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    pub async fn list_items(&self, restaurant_id: i64) -> ServiceResult<Vec<MenuItem>> {
        Ok(self.store.list_items(restaurant_id).await?)
    }

    pub async fn get_item(&self, restaurant_id: i64, item_id: i64) -> ServiceResult<MenuItem> {
        self.store
            .find_item(restaurant_id, item_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).into())
    }

    pub async fn set_status(
        &self,
        restaurant_id: i64,
        item_id: i64,
        status: MenuItemStatus,
    ) -> ServiceResult<MenuItem> {
        self.get_item(restaurant_id, item_id).await?;
        Ok(self
            .store
            .set_item_status(restaurant_id, item_id, status)
            .await?)
    }

    /// Soft delete; attachments to modifier groups are dropped
    pub async fn delete_item(&self, restaurant_id: i64, item_id: i64) -> ServiceResult<()> {
        self.get_item(restaurant_id, item_id).await?;
        self.store
            .soft_delete_item(restaurant_id, item_id, shared::util::now_millis())
            .await?;
        tracing::info!(item_id, "Menu item deleted");
        Ok(())
    }

    /// What a guest seated at `access.table_id` may order
    ///
    /// Available items only, each with its active groups and their active
    /// options. Attachments for the whole page load in one batch.
    pub async fn guest_menu(
        &self,
        access: TableAccess,
        query: GuestMenuQuery,
    ) -> ServiceResult<GuestMenu> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(GUEST_MENU_DEFAULT_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let offset = i64::from(page - 1) * i64::from(limit);
        let order = query.order.unwrap_or(SortOrder::Desc);

        let (items, total) = self
            .store
            .list_available_items(access.restaurant_id, &query, order, offset, i64::from(limit))
            .await?;

        let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let mut groups_by_item = self.store.list_groups_for_items(&item_ids).await?;

        let items = items
            .into_iter()
            .map(|item| {
                let modifier_groups = groups_by_item
                    .remove(&item.id)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|g| g.status.is_active())
                    .map(|mut g| {
                        g.options.retain(|o| o.status.is_active());
                        g
                    })
                    .collect();
                GuestMenuItem {
                    id: item.id,
                    name: item.name,
                    description: item.description,
                    price: item.price,
                    is_chef_recommended: item.is_chef_recommended,
                    modifier_groups,
                }
            })
            .collect();

        Ok(GuestMenu {
            table_id: access.table_id,
            table_number: access.table_number,
            items,
            total,
            page,
            limit,
        })
    }
}

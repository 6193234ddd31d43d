//! Modifier group / option management and item attachment

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    ModifierGroup, ModifierGroupCreate, ModifierGroupUpdate, ModifierOption, ModifierOptionCreate,
    ModifierOptionUpdate,
};

use super::constraints::{
    CardinalityConfig, enforce_required_has_options, normalize, validate_cardinality,
};
use crate::db::{GroupRecord, OptionRecord, Store};
use crate::error::ServiceResult;
use crate::validation::{MAX_MODIFIER_NAME_LEN, validate_required_text};

#[derive(Clone)]
pub struct ModifierService {
    store: Arc<dyn Store>,
}

impl ModifierService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_group(
        &self,
        restaurant_id: i64,
        data: ModifierGroupCreate,
    ) -> ServiceResult<ModifierGroup> {
        let config = CardinalityConfig {
            selection_type: data.selection_type,
            is_required: data.is_required.unwrap_or(false),
            min_selections: data.min_selections,
            max_selections: data.max_selections,
        };
        let record = build_group_record(
            data.name,
            data.display_order.unwrap_or(0),
            data.status.unwrap_or_default(),
            config,
        )?;
        // A new group has no options yet
        enforce_required_has_options(record.is_required, 0)?;

        let group = self.store.create_group(restaurant_id, &record).await?;
        tracing::info!(group_id = group.id, name = %group.name, "Modifier group created");
        Ok(group)
    }

    pub async fn update_group(
        &self,
        restaurant_id: i64,
        group_id: i64,
        patch: ModifierGroupUpdate,
    ) -> ServiceResult<ModifierGroup> {
        let existing = self.load_group(restaurant_id, group_id).await?;

        let config = CardinalityConfig {
            selection_type: patch.selection_type.unwrap_or(existing.selection_type),
            is_required: patch.is_required.unwrap_or(existing.is_required),
            min_selections: patch.min_selections.unwrap_or(existing.min_selections),
            max_selections: patch.max_selections.unwrap_or(existing.max_selections),
        };
        let record = build_group_record(
            patch.name.unwrap_or(existing.name),
            patch.display_order.unwrap_or(existing.display_order),
            patch.status.unwrap_or(existing.status),
            config,
        )?;

        let turning_required = patch.is_required == Some(true) || !existing.is_required;
        if record.is_required && turning_required {
            let option_count = self.store.count_options(group_id).await?;
            enforce_required_has_options(true, option_count)?;
        }

        let group = self
            .store
            .update_group(restaurant_id, group_id, &record)
            .await?;
        tracing::info!(group_id, "Modifier group updated");
        Ok(group)
    }

    pub async fn list_groups(&self, restaurant_id: i64) -> ServiceResult<Vec<ModifierGroup>> {
        Ok(self.store.list_groups(restaurant_id).await?)
    }

    pub async fn get_group(&self, restaurant_id: i64, group_id: i64) -> ServiceResult<ModifierGroup> {
        self.load_group(restaurant_id, group_id).await
    }

    /// Drops the group's item attachments and options along with it
    pub async fn delete_group(&self, restaurant_id: i64, group_id: i64) -> ServiceResult<()> {
        self.load_group(restaurant_id, group_id).await?;
        self.store.delete_group(restaurant_id, group_id).await?;
        tracing::info!(group_id, "Modifier group deleted");
        Ok(())
    }

    pub async fn add_option(
        &self,
        restaurant_id: i64,
        group_id: i64,
        data: ModifierOptionCreate,
    ) -> ServiceResult<ModifierOption> {
        self.load_group(restaurant_id, group_id).await?;

        let record = build_option_record(
            data.name,
            data.price_adjustment.unwrap_or(Decimal::ZERO),
            data.status.unwrap_or_default(),
        )?;
        Ok(self.store.create_option(group_id, &record).await?)
    }

    pub async fn update_option(
        &self,
        restaurant_id: i64,
        option_id: i64,
        patch: ModifierOptionUpdate,
    ) -> ServiceResult<ModifierOption> {
        let existing = self
            .store
            .find_option(restaurant_id, option_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ModifierOptionNotFound))?;

        let record = build_option_record(
            patch.name.unwrap_or(existing.name),
            patch.price_adjustment.unwrap_or(existing.price_adjustment),
            patch.status.unwrap_or(existing.status),
        )?;
        Ok(self.store.update_option(option_id, &record).await?)
    }

    /// Replace the item's attached groups with exactly `group_ids`
    ///
    /// Every id must resolve within the restaurant; otherwise nothing
    /// changes and the full unresolved set is reported.
    pub async fn attach_groups_to_item(
        &self,
        restaurant_id: i64,
        item_id: i64,
        group_ids: Vec<i64>,
    ) -> ServiceResult<Vec<ModifierGroup>> {
        self.load_item(restaurant_id, item_id).await?;

        let mut seen = HashSet::new();
        let group_ids: Vec<i64> = group_ids.into_iter().filter(|id| seen.insert(*id)).collect();

        let found: HashSet<i64> = self
            .store
            .existing_group_ids(restaurant_id, &group_ids)
            .await?
            .into_iter()
            .collect();
        let invalid: Vec<i64> = group_ids
            .iter()
            .copied()
            .filter(|id| !found.contains(id))
            .collect();
        if !invalid.is_empty() {
            let listed = invalid
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::with_message(
                ErrorCode::ModifierGroupsUnresolved,
                format!("Modifier groups not found: {listed}"),
            )
            .with_detail("invalid_ids", invalid)
            .into());
        }

        self.store.replace_item_groups(item_id, &group_ids).await?;
        tracing::info!(item_id, count = group_ids.len(), "Modifier groups attached");

        Ok(self.store.list_item_groups(item_id).await?)
    }

    pub async fn detach_group_from_item(
        &self,
        restaurant_id: i64,
        item_id: i64,
        group_id: i64,
    ) -> ServiceResult<()> {
        self.load_item(restaurant_id, item_id).await?;
        self.load_group(restaurant_id, group_id).await?;

        if !self.store.detach_item_group(item_id, group_id).await? {
            return Err(AppError::new(ErrorCode::ModifierNotAttached).into());
        }
        tracing::info!(item_id, group_id, "Modifier group detached");
        Ok(())
    }

    pub async fn list_item_groups(
        &self,
        restaurant_id: i64,
        item_id: i64,
    ) -> ServiceResult<Vec<ModifierGroup>> {
        self.load_item(restaurant_id, item_id).await?;
        Ok(self.store.list_item_groups(item_id).await?)
    }

    async fn load_group(&self, restaurant_id: i64, group_id: i64) -> ServiceResult<ModifierGroup> {
        self.store
            .find_group(restaurant_id, group_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ModifierGroupNotFound).into())
    }

    async fn load_item(&self, restaurant_id: i64, item_id: i64) -> ServiceResult<()> {
        self.store
            .find_item(restaurant_id, item_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
        Ok(())
    }
}

/// Validate and normalize group fields into a writable record
fn build_group_record(
    name: String,
    display_order: i32,
    status: shared::models::ModifierStatus,
    config: CardinalityConfig,
) -> Result<GroupRecord, AppError> {
    validate_required_text(&name, "name", MAX_MODIFIER_NAME_LEN)?;
    if display_order < 0 {
        return Err(AppError::validation("display_order must not be negative"));
    }
    validate_cardinality(&config)?;
    let config = normalize(config);

    Ok(GroupRecord {
        name: name.trim().to_string(),
        selection_type: config.selection_type,
        is_required: config.is_required,
        min_selections: config.min_selections,
        max_selections: config.max_selections,
        display_order,
        status,
    })
}

fn build_option_record(
    name: String,
    price_adjustment: Decimal,
    status: shared::models::ModifierStatus,
) -> Result<OptionRecord, AppError> {
    validate_required_text(&name, "name", MAX_MODIFIER_NAME_LEN)?;
    if price_adjustment < Decimal::ZERO {
        return Err(AppError::validation("price_adjustment must not be negative"));
    }
    Ok(OptionRecord {
        name: name.trim().to_string(),
        price_adjustment,
        status,
    })
}

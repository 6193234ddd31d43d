//! Dining table administration

use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TablePage, TableQuery, TableStatus,
};

use crate::db::{RepoError, Store};
use crate::error::{ServiceError, ServiceResult};
use crate::qr::QrService;
use crate::validation::{
    MAX_LOCATION_LEN, MAX_NOTE_LEN, validate_optional_text, validate_range,
    validate_required_text,
};

pub const MAX_CAPACITY: i32 = 20;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct TableService {
    store: Arc<dyn Store>,
    qr: QrService,
}

impl TableService {
    pub fn new(store: Arc<dyn Store>, qr: QrService) -> Self {
        Self { store, qr }
    }

    pub async fn create(
        &self,
        restaurant_id: i64,
        data: DiningTableCreate,
    ) -> ServiceResult<DiningTable> {
        validate_table_number(data.table_number)?;
        validate_range(data.capacity, "capacity", 1, MAX_CAPACITY)?;
        validate_required_text(&data.location, "location", MAX_LOCATION_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

        let table = self
            .store
            .create_table(restaurant_id, &data)
            .await
            .map_err(|e| number_conflict(e, data.table_number))?;
        tracing::info!(table_id = table.id, table_number = table.table_number, "Table created");
        Ok(table)
    }

    pub async fn list(&self, restaurant_id: i64, query: TableQuery) -> ServiceResult<TablePage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let offset = i64::from(page - 1) * i64::from(limit);

        let (items, total) = self
            .store
            .list_tables(restaurant_id, &query, offset, i64::from(limit))
            .await?;
        Ok(TablePage {
            items,
            total,
            page,
            limit,
        })
    }

    pub async fn get(&self, restaurant_id: i64, table_id: i64) -> ServiceResult<DiningTable> {
        self.store
            .find_table(restaurant_id, table_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).into())
    }

    pub async fn update(
        &self,
        restaurant_id: i64,
        table_id: i64,
        data: DiningTableUpdate,
    ) -> ServiceResult<DiningTable> {
        if let Some(number) = data.table_number {
            validate_table_number(number)?;
        }
        if let Some(capacity) = data.capacity {
            validate_range(capacity, "capacity", 1, MAX_CAPACITY)?;
        }
        if let Some(location) = &data.location {
            validate_required_text(location, "location", MAX_LOCATION_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

        self.get(restaurant_id, table_id).await?;
        let table = self
            .store
            .update_table(restaurant_id, table_id, &data)
            .await
            .map_err(|e| match data.table_number {
                Some(number) => number_conflict(e, number),
                None => e.into(),
            })?;
        Ok(table)
    }

    /// Change status; deactivation clears the stored QR token before returning
    pub async fn update_status(
        &self,
        restaurant_id: i64,
        table_id: i64,
        status: TableStatus,
    ) -> ServiceResult<DiningTable> {
        self.get(restaurant_id, table_id).await?;
        let table = match status {
            TableStatus::Inactive => {
                self.qr
                    .invalidate_on_deactivate(restaurant_id, table_id)
                    .await?
            }
            TableStatus::Active => {
                self.store
                    .set_table_status(restaurant_id, table_id, status)
                    .await?
            }
        };
        tracing::info!(table_id, ?status, "Table status changed");
        Ok(table)
    }

    /// Soft delete; the token goes with it
    pub async fn remove(&self, restaurant_id: i64, table_id: i64) -> ServiceResult<()> {
        self.get(restaurant_id, table_id).await?;
        self.store
            .soft_delete_table(restaurant_id, table_id, shared::util::now_millis())
            .await?;
        tracing::info!(table_id, "Table removed");
        Ok(())
    }
}

fn validate_table_number(number: i32) -> Result<(), AppError> {
    if number < 1 {
        return Err(AppError::validation(format!(
            "table_number must be at least 1, got {number}"
        )));
    }
    Ok(())
}

fn number_conflict(err: RepoError, table_number: i32) -> ServiceError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::TableNumberExists,
            format!("Table number {table_number} already exists"),
        )
        .into(),
        other => other.into(),
    }
}

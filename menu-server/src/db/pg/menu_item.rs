//! Menu item database operations

use shared::models::{
    GuestMenuQuery, GuestMenuSort, MenuItem, MenuItemCreate, MenuItemStatus, SortOrder,
};
use sqlx::PgPool;

use crate::db::{RepoError, RepoResult};

const COLUMNS: &str = "id, restaurant_id, name, description, price, status, \
                       is_chef_recommended, is_deleted, created_at, updated_at";

pub async fn create_item(
    pool: &PgPool,
    restaurant_id: i64,
    data: &MenuItemCreate,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let item: MenuItem = sqlx::query_as(&format!(
        r#"
        INSERT INTO menu_items (
            id, restaurant_id, name, description, price, status,
            is_chef_recommended, is_deleted, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.status.unwrap_or_default())
    .bind(data.is_chef_recommended.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn find_item(
    pool: &PgPool,
    restaurant_id: i64,
    item_id: i64,
) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items \
         WHERE restaurant_id = $1 AND id = $2 AND NOT is_deleted"
    ))
    .bind(restaurant_id)
    .bind(item_id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn list_items(pool: &PgPool, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items \
         WHERE restaurant_id = $1 AND NOT is_deleted ORDER BY name, id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_available_items(
    pool: &PgPool,
    restaurant_id: i64,
    query: &GuestMenuQuery,
    order: SortOrder,
    offset: i64,
    limit: i64,
) -> RepoResult<(Vec<MenuItem>, i64)> {
    const FILTER: &str = "restaurant_id = $1 AND NOT is_deleted AND status = 'available' \
                          AND ($2::text IS NULL OR strpos(lower(name), lower($2)) > 0) \
                          AND ($3::boolean IS NULL OR is_chef_recommended = $3)";

    let sort_column = match query.sort {
        GuestMenuSort::Price => "price",
        GuestMenuSort::CreatedAt => "created_at",
    };
    let direction = match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let (total,): (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM menu_items WHERE {FILTER}"
    ))
    .bind(restaurant_id)
    .bind(search)
    .bind(query.chef_recommended)
    .fetch_one(pool)
    .await?;

    let rows: Vec<MenuItem> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE {FILTER} \
         ORDER BY {sort_column} {direction}, id ASC LIMIT $4 OFFSET $5"
    ))
    .bind(restaurant_id)
    .bind(search)
    .bind(query.chef_recommended)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}

pub async fn set_item_status(
    pool: &PgPool,
    restaurant_id: i64,
    item_id: i64,
    status: MenuItemStatus,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();

    sqlx::query_as(&format!(
        "UPDATE menu_items SET status = $1, updated_at = $2 \
         WHERE restaurant_id = $3 AND id = $4 AND NOT is_deleted \
         RETURNING {COLUMNS}"
    ))
    .bind(status)
    .bind(now)
    .bind(restaurant_id)
    .bind(item_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("menu item {item_id}")))
}

pub async fn soft_delete_item(
    pool: &PgPool,
    restaurant_id: i64,
    item_id: i64,
    now: i64,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE menu_items SET is_deleted = TRUE, updated_at = $1 \
         WHERE restaurant_id = $2 AND id = $3 AND NOT is_deleted",
    )
    .bind(now)
    .bind(restaurant_id)
    .bind(item_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu item {item_id}")));
    }

    sqlx::query("DELETE FROM menu_item_modifier_groups WHERE menu_item_id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

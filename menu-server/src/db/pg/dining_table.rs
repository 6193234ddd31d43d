//! Dining table database operations

use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, SortOrder, TableQuery, TableSort,
    TableStatus,
};
use sqlx::PgPool;

use crate::db::{RepoError, RepoResult};

const COLUMNS: &str = "id, restaurant_id, table_number, capacity, location, description, status, \
                       qr_token, qr_token_created_at, created_at, updated_at, deleted_at";

pub async fn create_table(
    pool: &PgPool,
    restaurant_id: i64,
    data: &DiningTableCreate,
) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let table: DiningTable = sqlx::query_as(&format!(
        r#"
        INSERT INTO dining_tables (
            id, restaurant_id, table_number, capacity, location, description,
            status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(restaurant_id)
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(&data.location)
    .bind(&data.description)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(table)
}

pub async fn find_table(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM dining_tables \
         WHERE restaurant_id = $1 AND id = $2 AND deleted_at IS NULL"
    ))
    .bind(restaurant_id)
    .bind(table_id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn list_tables(
    pool: &PgPool,
    restaurant_id: i64,
    query: &TableQuery,
    offset: i64,
    limit: i64,
) -> RepoResult<(Vec<DiningTable>, i64)> {
    const FILTER: &str = "restaurant_id = $1 AND deleted_at IS NULL \
                          AND ($2::table_status IS NULL OR status = $2) \
                          AND ($3::text IS NULL OR location = $3)";

    let sort_column = match query.sort {
        TableSort::TableNumber => "table_number",
        TableSort::Capacity => "capacity",
        TableSort::CreatedAt => "created_at",
    };
    let direction = match query.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    let (total,): (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM dining_tables WHERE {FILTER}"
    ))
    .bind(restaurant_id)
    .bind(query.status)
    .bind(&query.location)
    .fetch_one(pool)
    .await?;

    let rows: Vec<DiningTable> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM dining_tables WHERE {FILTER} \
         ORDER BY {sort_column} {direction}, id ASC LIMIT $4 OFFSET $5"
    ))
    .bind(restaurant_id)
    .bind(query.status)
    .bind(&query.location)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}

pub async fn list_active_tables(pool: &PgPool, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
    let rows = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM dining_tables \
         WHERE restaurant_id = $1 AND deleted_at IS NULL AND status = 'active' \
         ORDER BY table_number"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_table(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: i64,
    data: &DiningTableUpdate,
) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();

    sqlx::query_as(&format!(
        r#"
        UPDATE dining_tables SET
            table_number = COALESCE($1, table_number),
            capacity = COALESCE($2, capacity),
            location = COALESCE($3, location),
            description = COALESCE($4, description),
            updated_at = $5
        WHERE restaurant_id = $6 AND id = $7 AND deleted_at IS NULL
        RETURNING {COLUMNS}
        "#
    ))
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(&data.location)
    .bind(&data.description)
    .bind(now)
    .bind(restaurant_id)
    .bind(table_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("dining table {table_id}")))
}

pub async fn set_table_status(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: i64,
    status: TableStatus,
) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();

    sqlx::query_as(&format!(
        "UPDATE dining_tables SET status = $1, updated_at = $2, \
         qr_token = CASE WHEN $1 = 'inactive'::table_status THEN NULL ELSE qr_token END, \
         qr_token_created_at = CASE WHEN $1 = 'inactive'::table_status THEN NULL ELSE qr_token_created_at END \
         WHERE restaurant_id = $3 AND id = $4 AND deleted_at IS NULL \
         RETURNING {COLUMNS}"
    ))
    .bind(status)
    .bind(now)
    .bind(restaurant_id)
    .bind(table_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("dining table {table_id}")))
}

pub async fn set_qr_token(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: i64,
    token: &str,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dining_tables SET qr_token = $1, qr_token_created_at = $2, updated_at = $2 \
         WHERE restaurant_id = $3 AND id = $4 AND deleted_at IS NULL AND status = 'active'",
    )
    .bind(token)
    .bind(now)
    .bind(restaurant_id)
    .bind(table_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn soft_delete_table(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE dining_tables SET deleted_at = $1, qr_token = NULL, qr_token_created_at = NULL, \
         updated_at = $1 \
         WHERE restaurant_id = $2 AND id = $3 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(restaurant_id)
    .bind(table_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("dining table {table_id}")));
    }
    Ok(())
}

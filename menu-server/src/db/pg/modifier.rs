//! Modifier group + option + item attachment database operations

use std::collections::HashMap;

use shared::models::{ModifierGroup, ModifierOption};
use sqlx::PgPool;

use crate::db::{GroupRecord, OptionRecord, RepoError, RepoResult};

const GROUP_COLUMNS: &str = "g.id, g.restaurant_id, g.name, g.selection_type, g.is_required, \
                             g.min_selections, g.max_selections, g.display_order, g.status, \
                             g.created_at, g.updated_at";

const OPTION_COLUMNS: &str = "o.id, o.group_id, o.name, o.price_adjustment, o.status, o.created_at";

/// Load options for the given groups and embed them, preserving group order
async fn with_options(pool: &PgPool, mut groups: Vec<ModifierGroup>) -> RepoResult<Vec<ModifierGroup>> {
    if groups.is_empty() {
        return Ok(groups);
    }
    let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();

    let options: Vec<ModifierOption> = sqlx::query_as(&format!(
        "SELECT {OPTION_COLUMNS} FROM modifier_options o \
         WHERE o.group_id = ANY($1) ORDER BY o.created_at, o.id"
    ))
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_group: HashMap<i64, Vec<ModifierOption>> = HashMap::new();
    for opt in options {
        by_group.entry(opt.group_id).or_default().push(opt);
    }
    for group in &mut groups {
        group.options = by_group.remove(&group.id).unwrap_or_default();
    }
    Ok(groups)
}

pub async fn create_group(
    pool: &PgPool,
    restaurant_id: i64,
    record: &GroupRecord,
) -> RepoResult<ModifierGroup> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let group: ModifierGroup = sqlx::query_as(
        r#"
        INSERT INTO modifier_groups (
            id, restaurant_id, name, selection_type, is_required,
            min_selections, max_selections, display_order, status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING id, restaurant_id, name, selection_type, is_required,
                  min_selections, max_selections, display_order, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(&record.name)
    .bind(record.selection_type)
    .bind(record.is_required)
    .bind(record.min_selections)
    .bind(record.max_selections)
    .bind(record.display_order)
    .bind(record.status)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(group)
}

pub async fn update_group(
    pool: &PgPool,
    restaurant_id: i64,
    group_id: i64,
    record: &GroupRecord,
) -> RepoResult<ModifierGroup> {
    let now = shared::util::now_millis();

    let group: ModifierGroup = sqlx::query_as(
        r#"
        UPDATE modifier_groups SET
            name = $1, selection_type = $2, is_required = $3,
            min_selections = $4, max_selections = $5, display_order = $6,
            status = $7, updated_at = $8
        WHERE restaurant_id = $9 AND id = $10
        RETURNING id, restaurant_id, name, selection_type, is_required,
                  min_selections, max_selections, display_order, status, created_at, updated_at
        "#,
    )
    .bind(&record.name)
    .bind(record.selection_type)
    .bind(record.is_required)
    .bind(record.min_selections)
    .bind(record.max_selections)
    .bind(record.display_order)
    .bind(record.status)
    .bind(now)
    .bind(restaurant_id)
    .bind(group_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("modifier group {group_id}")))?;

    let mut groups = with_options(pool, vec![group]).await?;
    groups
        .pop()
        .ok_or_else(|| RepoError::NotFound(format!("modifier group {group_id}")))
}

pub async fn find_group(
    pool: &PgPool,
    restaurant_id: i64,
    group_id: i64,
) -> RepoResult<Option<ModifierGroup>> {
    let group: Option<ModifierGroup> = sqlx::query_as(&format!(
        "SELECT {GROUP_COLUMNS} FROM modifier_groups g WHERE g.restaurant_id = $1 AND g.id = $2"
    ))
    .bind(restaurant_id)
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    match group {
        Some(g) => Ok(with_options(pool, vec![g]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn list_groups(pool: &PgPool, restaurant_id: i64) -> RepoResult<Vec<ModifierGroup>> {
    let groups: Vec<ModifierGroup> = sqlx::query_as(&format!(
        "SELECT {GROUP_COLUMNS} FROM modifier_groups g \
         WHERE g.restaurant_id = $1 ORDER BY g.display_order, g.name, g.id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    with_options(pool, groups).await
}

pub async fn existing_group_ids(
    pool: &PgPool,
    restaurant_id: i64,
    group_ids: &[i64],
) -> RepoResult<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT id FROM modifier_groups WHERE restaurant_id = $1 AND id = ANY($2)",
    )
    .bind(restaurant_id)
    .bind(group_ids)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn delete_group(pool: &PgPool, restaurant_id: i64, group_id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let owned: Option<i64> =
        sqlx::query_scalar("SELECT id FROM modifier_groups WHERE restaurant_id = $1 AND id = $2 FOR UPDATE")
            .bind(restaurant_id)
            .bind(group_id)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Err(RepoError::NotFound(format!("modifier group {group_id}")));
    }

    sqlx::query("DELETE FROM menu_item_modifier_groups WHERE modifier_group_id = $1")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM modifier_options WHERE group_id = $1")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM modifier_groups WHERE id = $1")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn count_options(pool: &PgPool, group_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modifier_options WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create_option(
    pool: &PgPool,
    group_id: i64,
    record: &OptionRecord,
) -> RepoResult<ModifierOption> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let option: ModifierOption = sqlx::query_as(
        r#"
        INSERT INTO modifier_options (id, group_id, name, price_adjustment, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, group_id, name, price_adjustment, status, created_at
        "#,
    )
    .bind(id)
    .bind(group_id)
    .bind(&record.name)
    .bind(record.price_adjustment)
    .bind(record.status)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(option)
}

pub async fn find_option(
    pool: &PgPool,
    restaurant_id: i64,
    option_id: i64,
) -> RepoResult<Option<ModifierOption>> {
    let option = sqlx::query_as(&format!(
        "SELECT {OPTION_COLUMNS} FROM modifier_options o \
         JOIN modifier_groups g ON g.id = o.group_id \
         WHERE g.restaurant_id = $1 AND o.id = $2"
    ))
    .bind(restaurant_id)
    .bind(option_id)
    .fetch_optional(pool)
    .await?;
    Ok(option)
}

pub async fn update_option(
    pool: &PgPool,
    option_id: i64,
    record: &OptionRecord,
) -> RepoResult<ModifierOption> {
    sqlx::query_as(
        r#"
        UPDATE modifier_options SET name = $1, price_adjustment = $2, status = $3
        WHERE id = $4
        RETURNING id, group_id, name, price_adjustment, status, created_at
        "#,
    )
    .bind(&record.name)
    .bind(record.price_adjustment)
    .bind(record.status)
    .bind(option_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("modifier option {option_id}")))
}

pub async fn replace_item_groups(pool: &PgPool, item_id: i64, group_ids: &[i64]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM menu_item_modifier_groups WHERE menu_item_id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    if !group_ids.is_empty() {
        sqlx::query(
            "INSERT INTO menu_item_modifier_groups (menu_item_id, modifier_group_id) \
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(item_id)
        .bind(group_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn detach_item_group(pool: &PgPool, item_id: i64, group_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM menu_item_modifier_groups WHERE menu_item_id = $1 AND modifier_group_id = $2",
    )
    .bind(item_id)
    .bind(group_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn list_item_groups(pool: &PgPool, item_id: i64) -> RepoResult<Vec<ModifierGroup>> {
    let groups: Vec<ModifierGroup> = sqlx::query_as(&format!(
        "SELECT {GROUP_COLUMNS} FROM modifier_groups g \
         JOIN menu_item_modifier_groups l ON l.modifier_group_id = g.id \
         WHERE l.menu_item_id = $1 ORDER BY g.display_order, g.name, g.id"
    ))
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    with_options(pool, groups).await
}

pub async fn list_groups_for_items(
    pool: &PgPool,
    item_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<ModifierGroup>>> {
    if item_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT menu_item_id, modifier_group_id FROM menu_item_modifier_groups \
         WHERE menu_item_id = ANY($1)",
    )
    .bind(item_ids)
    .fetch_all(pool)
    .await?;
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let mut group_ids: Vec<i64> = links.iter().map(|(_, g)| *g).collect();
    group_ids.sort_unstable();
    group_ids.dedup();

    let groups: Vec<ModifierGroup> = sqlx::query_as(&format!(
        "SELECT {GROUP_COLUMNS} FROM modifier_groups g \
         WHERE g.id = ANY($1) ORDER BY g.display_order, g.name, g.id"
    ))
    .bind(&group_ids)
    .fetch_all(pool)
    .await?;
    let groups = with_options(pool, groups).await?;

    let mut by_item: HashMap<i64, Vec<ModifierGroup>> = HashMap::new();
    for group in &groups {
        for (item_id, _) in links.iter().filter(|(_, g)| *g == group.id) {
            by_item.entry(*item_id).or_default().push(group.clone());
        }
    }
    Ok(by_item)
}

//! Staff account database operations

use sqlx::PgPool;

use crate::db::{RepoResult, Staff};

pub async fn find_by_email(pool: &PgPool, email: &str) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as(
        "SELECT id, restaurant_id, email, password_hash, name, created_at \
         FROM staff WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn create(
    pool: &PgPool,
    restaurant_id: i64,
    email: &str,
    password_hash: &str,
    name: Option<&str>,
) -> RepoResult<Staff> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let staff = sqlx::query_as(
        r#"
        INSERT INTO staff (id, restaurant_id, email, password_hash, name, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, restaurant_id, email, password_hash, name, created_at
        "#,
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(staff)
}

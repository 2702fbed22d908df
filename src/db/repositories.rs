//! Repositories: users and login sessions.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;

// ---- User ----

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub async fn user_create(
    pool: &DbPool,
    email: &str,
    first_name: &str,
    password_hash: &str,
) -> AppResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, first_name, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, email, first_name, password_hash, created_at
        "#,
    )
    .bind(email)
    .bind(first_name)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::Validation("Email already exists!".to_string()))
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, first_name, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn user_get_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, first_name, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// ---- Login sessions ----

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub async fn session_create(
    pool: &DbPool,
    user_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> AppResult<SessionRow> {
    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        INSERT INTO sessions (user_id, token, expires_at)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, token, created_at, expires_at
        "#,
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn session_find_by_token(pool: &DbPool, token: &str) -> AppResult<Option<SessionRow>> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT id, user_id, token, created_at, expires_at FROM sessions WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn session_delete_by_token(pool: &DbPool, token: &str) -> AppResult<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn session_delete_expired(pool: &DbPool) -> AppResult<u64> {
    let r = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;
    Ok(r.rows_affected())
}

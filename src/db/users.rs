//! Users repository
//!
//! Users carry no credential material. See [crate::services::auth] for how
//! logins are checked.

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;

use super::sqlite_helpers::{new_id, now_iso8601};

/// Shortest accepted username
pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub favorite_genre: String,
}

pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, user: CreateUser) -> Result<UserRecord> {
        if user.username.trim().chars().count() < MIN_USERNAME_LEN {
            bail!("username must be at least {} characters", MIN_USERNAME_LEN);
        }
        if user.favorite_genre.trim().is_empty() {
            bail!("favorite genre must not be empty");
        }

        let id = new_id();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, favorite_genre, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(&user.username)
        .bind(&user.favorite_genre)
        .bind(now_iso8601())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert user '{}'", user.username))?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create user"))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, favorite_genre, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get user by exact username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, favorite_genre, created_at FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

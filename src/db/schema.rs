//! Table definitions, applied at startup
//!
//! Every statement is idempotent (`IF NOT EXISTS`), so running [apply] against
//! an existing database only creates what is missing.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::debug;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "authors",
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            born INTEGER,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "books",
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL UNIQUE,
            published INTEGER NOT NULL,
            author_id TEXT NOT NULL REFERENCES authors(id),
            genres TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "idx_books_author_id",
        "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id)",
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            favorite_genre TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
];

/// Apply all table definitions
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    for (name, sql) in STATEMENTS {
        debug!(object = name, "Ensuring schema object");
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create {}", name))?;
    }
    Ok(())
}

//! Authors repository

use std::collections::HashMap;

use anyhow::{Result, anyhow, bail};
use sqlx::{SqliteConnection, SqlitePool};

use super::sqlite_helpers::{new_id, now_iso8601, placeholders};

/// Author record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub born: Option<i32>,
    pub created_at: String,
}

pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Total number of authors
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All authors in insertion order
    pub async fn list_all(&self) -> Result<Vec<AuthorRecord>> {
        let records = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at FROM authors ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get an author by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<AuthorRecord>> {
        let record = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at FROM authors WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get an author by exact name
    pub async fn get_by_name(&self, name: &str) -> Result<Option<AuthorRecord>> {
        let record = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at FROM authors WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Set the birth year of the author with `id` and return the updated record
    pub async fn set_born(&self, id: &str, born: i32) -> Result<AuthorRecord> {
        let result = sqlx::query("UPDATE authors SET born = ?1 WHERE id = ?2")
            .bind(born)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            bail!("Author {} disappeared during update", id);
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Author {} disappeared during update", id))
    }

    /// Count books per author name in a single grouped query.
    ///
    /// Every requested name is present in the result; unknown names and
    /// authors without books map to 0.
    pub async fn book_counts_by_name(&self, names: &[String]) -> Result<HashMap<String, i64>> {
        let mut counts: HashMap<String, i64> = names.iter().map(|n| (n.clone(), 0)).collect();
        if names.is_empty() {
            return Ok(counts);
        }

        let sql = format!(
            r#"
            SELECT a.name, COUNT(b.id)
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            WHERE a.name IN ({})
            GROUP BY a.name
            "#,
            placeholders(names.len())
        );

        let mut query = sqlx::query_as::<_, (String, i64)>(&sql);
        for name in names {
            query = query.bind(name);
        }

        for (name, count) in query.fetch_all(&self.pool).await? {
            counts.insert(name, count);
        }

        Ok(counts)
    }
}

/// Reject author names the catalog can't key on
pub fn validate_author_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("author name must not be empty");
    }
    Ok(())
}

/// Find the author called `name`, inserting it first if absent.
///
/// Runs on a caller-supplied connection so it can join an open transaction.
/// The insert is an upsert keyed by the unique name, so concurrent callers
/// converge on one row. Returns the author and whether this call created it.
pub(crate) async fn find_or_create_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<(AuthorRecord, bool)> {
    validate_author_name(name)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO authors (id, name, born, created_at)
        VALUES (?1, ?2, NULL, ?3)
        ON CONFLICT(name) DO NOTHING
        "#,
    )
    .bind(new_id())
    .bind(name)
    .bind(now_iso8601())
    .execute(&mut *conn)
    .await?;

    let author = sqlx::query_as::<_, AuthorRecord>(
        "SELECT id, name, born, created_at FROM authors WHERE name = ?1",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok((author, inserted.rows_affected() == 1))
}

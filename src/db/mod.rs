//! Database connection and repositories
//!
//! All persistent state (authors, books, users) lives in SQLite behind a
//! `sqlx` pool. Each repository is cheap to construct and clones the pool.

pub mod authors;
pub mod books;
pub mod schema;
pub mod sqlite_helpers;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::warn;

pub use authors::{AuthorRecord, AuthorRepository};
pub use books::{BookRepository, BookWithAuthor, CreateBook};
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    ///
    /// An in-memory database lives only as long as its connections, so
    /// in-memory URLs get a single connection that is never recycled,
    /// whatever `max_connections` says.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10));

        if is_in_memory(url) {
            if max_connections != 1 {
                warn!(
                    requested = max_connections,
                    "In-memory database limited to one connection"
                );
            }
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// Single-connection in-memory database with the schema applied.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let db = Self::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory sqlite");
        db.migrate().await.expect("schema");
        db
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get an authors repository
    pub fn authors(&self) -> AuthorRepository {
        AuthorRepository::new(self.pool.clone())
    }

    /// Get a books repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Check that the store answers queries
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    /// Create any missing tables and indexes
    pub async fn migrate(&self) -> Result<()> {
        schema::apply(&self.pool).await
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://catalog.db?mode=memory"));
        assert!(!is_in_memory("sqlite://data/bookshelf.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_in_memory_url_keeps_schema_across_requests() {
        let db = Database::connect("sqlite::memory:", 10).await.unwrap();
        db.migrate().await.unwrap();

        assert_eq!(db.pool().options().get_max_connections(), 1);

        // Concurrent readers all see the migrated tables
        let counts = count_books_concurrently(&db).await;
        assert!(counts.iter().all(|c| *c == 0), "{:?}", counts);
    }

    async fn count_books_concurrently(db: &Database) -> Vec<i64> {
        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.books().count().await.unwrap() })
            })
            .collect();

        let mut counts = Vec::new();
        for task in tasks {
            counts.push(task.await.unwrap());
        }
        counts
    }
}

//! Books repository

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;

use super::authors::{AuthorRecord, find_or_create_by_name};
use super::sqlite_helpers::{json_to_vec, new_id, now_iso8601, vec_to_json};

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub author_id: String,
    /// Genre labels in the order they were given
    pub genres: Vec<String>,
    pub created_at: String,
}

impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for BookRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        // JSON array stored as TEXT
        let genres_json: String = row.try_get("genres")?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            published: row.try_get("published")?,
            author_id: row.try_get("author_id")?,
            genres: json_to_vec(&genres_json),
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A book joined with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithAuthor {
    pub book: BookRecord,
    pub author: AuthorRecord,
}

impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for BookWithAuthor {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        Ok(Self {
            book: BookRecord::from_row(row)?,
            author: AuthorRecord {
                id: row.try_get("author_id")?,
                name: row.try_get("author_name")?,
                born: row.try_get("author_born")?,
                created_at: row.try_get("author_created_at")?,
            },
        })
    }
}

/// Input for creating a new book
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    /// Name of the author; created if no author has this name yet
    pub author_name: String,
    pub published: i32,
    pub genres: Vec<String>,
}

/// Outcome of [BookRepository::create_with_author]
#[derive(Debug, Clone)]
pub struct CreatedBook {
    pub book: BookWithAuthor,
    pub author_created: bool,
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT b.id, b.title, b.published, b.author_id, b.genres, b.created_at,
           a.name AS author_name, a.born AS author_born, a.created_at AS author_created_at
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Total number of books
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All books with their authors resolved, in insertion order
    pub async fn list_with_authors(&self) -> Result<Vec<BookWithAuthor>> {
        let sql = format!("{} ORDER BY b.rowid", SELECT_WITH_AUTHOR);
        let records = sqlx::query_as::<_, BookWithAuthor>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Insert a book, creating its author first if needed.
    ///
    /// Both writes share one transaction: if the book is rejected, an author
    /// created for it is rolled back too.
    pub async fn create_with_author(&self, input: CreateBook) -> Result<CreatedBook> {
        validate_title(&input.title)?;

        let mut tx = self.pool.begin().await?;

        let (author, author_created) = find_or_create_by_name(&mut *tx, &input.author_name).await?;

        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO books (id, title, published, author_id, genres, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(&input.title)
        .bind(input.published)
        .bind(&author.id)
        .bind(vec_to_json(&input.genres))
        .bind(now_iso8601())
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert book '{}'", input.title))?;

        let sql = format!("{} WHERE b.id = ?1", SELECT_WITH_AUTHOR);
        let book = sqlx::query_as::<_, BookWithAuthor>(&sql)
            .bind(&id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CreatedBook {
            book,
            author_created,
        })
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }
    Ok(())
}

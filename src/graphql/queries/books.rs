use super::prelude::*;
use crate::graphql::filters::filter_books;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Total number of books
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data_unchecked::<Database>();
        let count = db.books().count().await.or_internal()?;
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    /// All books, optionally filtered by exact author name and genre
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let books: Vec<Book> = db
            .books()
            .list_with_authors()
            .await
            .or_internal()?
            .into_iter()
            .map(Book::from)
            .collect();

        Ok(filter_books(books, author.as_deref(), genre.as_deref()))
    }
}

use super::prelude::*;
use crate::db::CreateBook;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book, creating its author if the name is new
    ///
    /// Requires authentication.
    #[graphql(guard = "AuthGuard")]
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> Result<Option<Book>> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let input = CreateBook {
            title: title.clone(),
            author_name: author,
            published,
            genres,
        };

        match db.books().create_with_author(input).await {
            Ok(created) => {
                tracing::info!(
                    book_id = %created.book.book.id,
                    title = %created.book.book.title,
                    author = %created.book.author.name,
                    author_created = created.author_created,
                    user = %user.username,
                    "Book added"
                );
                Ok(Some(created.book.into()))
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Saving book failed");
                Err(CatalogError::save_failed("Saving book failed", title, e).extend())
            }
        }
    }
}

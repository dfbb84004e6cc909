use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Total number of authors
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data_unchecked::<Database>();
        let count = db.authors().count().await.or_internal()?;
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    /// All authors in the order they were first seen
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let db = ctx.data_unchecked::<Database>();
        let authors = db.authors().list_all().await.or_internal()?;
        Ok(authors.into_iter().map(Author::from).collect())
    }
}

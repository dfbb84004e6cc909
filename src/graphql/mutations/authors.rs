use super::prelude::*;

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    /// Set an author's birth year
    ///
    /// Requires authentication. Returns null when no author has `name`.
    #[graphql(guard = "AuthGuard")]
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Option<Author>> {
        let db = ctx.data_unchecked::<Database>();
        let authors = db.authors();

        let Some(existing) = authors.get_by_name(&name).await.or_internal()? else {
            tracing::debug!(name = %name, "editAuthor on unknown author");
            return Ok(None);
        };

        match authors.set_born(&existing.id, set_born_to).await {
            Ok(updated) => {
                tracing::info!(author_id = %updated.id, name = %updated.name, born = set_born_to, "Author updated");
                Ok(Some(updated.into()))
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Changing born date failed");
                Err(CatalogError::save_failed("Changing born date failed", set_born_to, e).extend())
            }
        }
    }
}

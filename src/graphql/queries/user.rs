use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The user the request is authenticated as, or null
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.try_auth_user().map(User::from)
    }
}

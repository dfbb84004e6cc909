//! User registration and login
//!
//! Neither mutation requires authentication.

use super::prelude::*;
use crate::db::CreateUser;
use crate::services::{AuthError, AuthService};

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Register a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
    ) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();

        let input = CreateUser {
            username: username.clone(),
            favorite_genre,
        };

        match db.users().create(input).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User created");
                Ok(Some(user.into()))
            }
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Creating the user failed");
                Err(CatalogError::save_failed("Creating the user failed", username, e).extend())
            }
        }
    }

    /// Exchange credentials for a bearer token
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<Token>> {
        let auth = ctx.data_unchecked::<AuthService>();

        match auth.login(&username, &password).await {
            Ok(value) => {
                tracing::info!(username = %username, "User logged in");
                Ok(Some(Token { value }))
            }
            Err(AuthError::WrongCredentials) => {
                tracing::warn!(username = %username, "Rejected login");
                Err(CatalogError::BadCredentials.extend())
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Login failed");
                Err(CatalogError::from(e).extend())
            }
        }
    }
}

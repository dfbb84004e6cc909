//! GraphQL authentication
//!
//! The request handler puts an [AuthUser] into the request data when a valid
//! bearer token was presented. Resolvers read it through [AuthExt].
//!
//! ## Guards
//!
//! Use `AuthGuard` to require authentication on any GraphQL operation:
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn protected_mutation(&self, ctx: &Context<'_>) -> Result<Book> { ... }
//! ```

use async_graphql::{Context, ErrorExtensions, Result};

use crate::db::UserRecord;

use super::errors::CatalogError;

/// The user a request was authenticated as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

impl From<UserRecord> for AuthUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            favorite_genre: user.favorite_genre,
        }
    }
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>()
            .ok_or_else(|| CatalogError::Unauthenticated.extend())
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}

/// Guard that requires authentication for GraphQL operations.
///
/// Runs before the resolver body, so a rejected call never touches the store.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().map(|_| ());
        async move { result }
    }
}

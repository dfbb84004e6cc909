//! GraphQL schema definition
//!
//! Queries and mutations live in per-domain modules under `queries/` and
//! `mutations/` and are merged into the roots here.

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::loaders::BookCountLoader;
use super::mutations::{AuthorMutations, BookMutations, UserMutations};
use super::queries::{AuthorQueries, BookQueries, UserQueries};

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries, AuthorQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(BookMutations, AuthorMutations, UserMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth: AuthService) -> CatalogSchema {
    // No cache: every load reads current book counts
    let book_counts = DataLoader::new(BookCountLoader::new(db.clone()), tokio::spawn);

    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(auth)
        .data(book_counts)
        .extension(async_graphql::extensions::Tracing)
        .finish()
}

//! GraphQL DataLoaders for batching database queries
//!
//! `Author.bookCount` is resolved once per returned author. Without batching,
//! a list of N authors costs N book scans. The loader collects every author
//! name requested while one response is being built and answers them with a
//! single grouped query.
//!
//! The loader is registered on the schema without a cache, so each load hits
//! the store and counts are never stale.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;

use crate::db::Database;

/// Loads book counts keyed by author name
pub struct BookCountLoader {
    db: Database,
}

impl BookCountLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<String> for BookCountLoader {
    type Value = i64;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        tracing::debug!(author_count = keys.len(), "Batch loading book counts");

        let counts = self
            .db
            .authors()
            .book_counts_by_name(keys)
            .await
            .map_err(Arc::new)?;

        Ok(counts)
    }
}

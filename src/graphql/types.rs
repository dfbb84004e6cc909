//! GraphQL type definitions
//!
//! These types mirror the database records but are decorated with
//! async-graphql attributes. Field names are camelCased by async-graphql.

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ErrorExtensions, ID, Result, SimpleObject};

use crate::db::{AuthorRecord, BookWithAuthor, UserRecord};

use super::auth::AuthUser;
use super::errors::CatalogError;
use super::loaders::BookCountLoader;

/// A book author
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub name: String,
    /// Birth year, if known
    pub born: Option<i32>,
    pub id: ID,
}

#[ComplexObject]
impl Author {
    /// Number of books by this author, counted at query time
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let loader = ctx.data_unchecked::<DataLoader<BookCountLoader>>();
        let count = loader
            .load_one(self.name.clone())
            .await
            .map_err(|e| CatalogError::Internal(anyhow::anyhow!("{:#}", e)).extend())?
            .unwrap_or(0);

        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }
}

impl From<AuthorRecord> for Author {
    fn from(r: AuthorRecord) -> Self {
        Self {
            name: r.name,
            born: r.born,
            id: ID(r.id),
        }
    }
}

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Book {
    pub title: String,
    /// Publication year
    pub published: i32,
    pub author: Author,
    pub id: ID,
    /// Genre labels, in the order they were given
    pub genres: Vec<String>,
}

impl From<BookWithAuthor> for Book {
    fn from(r: BookWithAuthor) -> Self {
        Self {
            title: r.book.title,
            published: r.book.published,
            author: r.author.into(),
            id: ID(r.book.id),
            genres: r.book.genres,
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct User {
    pub username: String,
    pub favorite_genre: String,
    pub id: ID,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            username: r.username,
            favorite_genre: r.favorite_genre,
            id: ID(r.id),
        }
    }
}

impl From<&AuthUser> for User {
    fn from(u: &AuthUser) -> Self {
        Self {
            username: u.username.clone(),
            favorite_genre: u.favorite_genre.clone(),
            id: ID(u.id.clone()),
        }
    }
}

/// A signed bearer token
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    pub value: String,
}

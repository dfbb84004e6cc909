//! GraphQL API for the book catalog
//!
//! Queries and mutations are split into per-domain modules and merged in
//! `schema.rs`. The HTTP handler in `service.rs` resolves the current user
//! before executing each request.

pub mod auth;
pub mod context;
pub mod errors;
pub mod filters;
pub mod loaders;
pub mod mutations;
pub mod queries;
mod schema;
pub mod service;
pub mod types;

pub use schema::{CatalogSchema, build_schema};

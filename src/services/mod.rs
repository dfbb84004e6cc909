//! Application services

pub mod auth;

pub use auth::{AuthConfig, AuthError, AuthService};

//! Application configuration management

use std::env;

use anyhow::{Context, Result, anyhow, bail};

/// Longest accepted token lifetime in seconds
pub const MAX_TOKEN_LIFETIME_SECS: i64 = i32::MAX as i64;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite connection URL (e.g. `sqlite://data/bookshelf.db?mode=rwc`)
    pub database_url: String,

    /// Maximum size of the connection pool
    pub database_max_connections: u32,

    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,

    /// Lifetime of an issued token in seconds
    pub token_lifetime_secs: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{} is required", key))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let token_lifetime_secs: i64 = lookup("TOKEN_LIFETIME_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .context("Invalid TOKEN_LIFETIME_SECS")?;
        if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&token_lifetime_secs) {
            bail!(
                "Invalid TOKEN_LIFETIME_SECS: {} is outside 1..={}",
                token_lifetime_secs,
                MAX_TOKEN_LIFETIME_SECS
            );
        }

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,

            jwt_secret,

            token_lifetime_secs,
        })
    }
}

//! Authentication service: login and bearer token handling
//!
//! Provides:
//! - Login against the shared demo password
//! - JWT issuance with `{username, id}` claims
//! - JWT verification for the request context
//!
//! # Demo credential
//!
//! No password is stored per user. Every account logs in with the single
//! literal [SHARED_PASSWORD]. This is a fixture for demos and tests, not a
//! credential system; a deployment holding real data needs per-user password
//! hashes checked here instead.

use anyhow::anyhow;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{Database, UserRecord};

/// The one password every user logs in with
pub const SHARED_PASSWORD: &str = "secret";

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 60 * 60;

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims embedded in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username at issue time
    pub username: String,
    /// User ID
    pub id: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password; deliberately the same for both
    #[error("wrong credentials")]
    WrongCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_lifetime: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME_SECS,
        }
    }

    pub fn with_token_lifetime(mut self, seconds: i64) -> Self {
        self.token_lifetime = seconds;
        self
    }
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Check credentials and issue a token for the user.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self.db.users().get_by_username(username).await?;

        let user = match user {
            Some(u) if password == SHARED_PASSWORD => u,
            _ => return Err(AuthError::WrongCredentials),
        };

        self.issue_token(&user)
    }

    /// Sign a token for `user`, valid for the configured lifetime
    pub fn issue_token(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires = TimeDelta::try_seconds(self.config.token_lifetime)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Other(anyhow!(
                    "Token lifetime of {}s is out of range",
                    self.config.token_lifetime
                ))
            })?;

        let claims = TokenClaims {
            username: user.username.clone(),
            id: user.id.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Other(anyhow!("Failed to create token: {}", e)))
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    /// Resolve the user a verified token belongs to.
    ///
    /// A user deleted after issue resolves to `None`.
    pub async fn user_for_token(&self, token: &str) -> Result<Option<UserRecord>, AuthError> {
        let claims = self.verify_token(token)?;
        Ok(self.db.users().get_by_id(&claims.id).await?)
    }
}

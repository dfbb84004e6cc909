//! Client-visible error taxonomy
//!
//! Every error leaving a resolver goes through [CatalogError] so its
//! `extensions` is always an object with at least `code` and `kind`.

use async_graphql::{ErrorExtensions, Value};
use thiserror::Error;

use crate::services::AuthError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Mutation requiring a current user invoked without one
    #[error("not authenticated")]
    Unauthenticated,

    /// Unknown username or wrong password
    #[error("wrong credentials")]
    BadCredentials,

    /// The store rejected an entity
    #[error("{message}")]
    SaveFailed {
        message: &'static str,
        /// The argument value that was being saved
        invalid_args: Value,
        /// Underlying store or validation message
        cause: String,
    },

    /// Malformed, expired or foreign token on a present Authorization header
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn save_failed(
        message: &'static str,
        invalid_args: impl Into<Value>,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self::SaveFailed {
            message,
            invalid_args: invalid_args.into(),
            cause: format!("{:#}", cause),
        }
    }

    /// Broad category, following the Apollo convention
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated | Self::BadCredentials | Self::SaveFailed { .. } => {
                "BAD_USER_INPUT"
            }
            Self::InvalidToken(_) => "UNAUTHENTICATED",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Exact failure, for clients that need to tell the cases apart
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::BadCredentials => "BAD_CREDENTIALS",
            Self::SaveFailed { .. } => "SAVE_FAILED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            e.set("kind", self.kind());
            if let Self::SaveFailed {
                invalid_args,
                cause,
                ..
            } = self
            {
                e.set("invalidArgs", invalid_args.clone());
                e.set("error", cause.as_str());
            }
        })
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WrongCredentials => Self::BadCredentials,
            AuthError::InvalidToken(e) => Self::InvalidToken(e.to_string()),
            AuthError::Other(e) => Self::Internal(e),
        }
    }
}

/// Convert store failures on read paths into [CatalogError::Internal]
pub trait OrInternal<T> {
    fn or_internal(self) -> async_graphql::Result<T>;
}

impl<T> OrInternal<T> for anyhow::Result<T> {
    fn or_internal(self) -> async_graphql::Result<T> {
        self.map_err(|e| {
            tracing::error!(error = %e, "Store operation failed");
            CatalogError::Internal(e).extend()
        })
    }
}

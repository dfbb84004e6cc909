//! Per-request context resolution
//!
//! Turns the `Authorization` header into the current user, if any.

use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::services::AuthService;

use super::auth::AuthUser;
use super::errors::CatalogError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the Authorization header.
///
/// Headers using any other scheme are ignored.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Resolve the current user for a request.
///
/// - no bearer token: anonymous
/// - bad signature or expired: [CatalogError::InvalidToken]
/// - valid token for a user that no longer exists: anonymous
pub async fn current_user(
    auth: &AuthService,
    headers: &HeaderMap,
) -> Result<Option<AuthUser>, CatalogError> {
    let Some(token) = extract_token(headers) else {
        return Ok(None);
    };

    match auth.user_for_token(token).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, username = %user.username, "Request authenticated");
            Ok(Some(user.into()))
        }
        Ok(None) => {
            tracing::debug!("Token refers to a missing user, treating request as anonymous");
            Ok(None)
        }
        Err(e) => {
            let err = CatalogError::from(e);
            tracing::debug!(error = %err, "Rejected bearer token");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;
    use crate::db::{CreateUser, Database};
    use crate::services::AuthConfig;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    async fn setup() -> (Database, AuthService) {
        let db = Database::in_memory().await;
        let auth = AuthService::new(db.clone(), AuthConfig::new("test-secret"));
        (db, auth)
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(&headers_with("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_token(&headers_with("Basic YWxpY2U6c2VjcmV0")), None);
        assert_eq!(extract_token(&headers_with("bearer abc.def")), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_no_header_is_anonymous() {
        let (_, auth) = setup().await;
        assert_matches!(current_user(&auth, &HeaderMap::new()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_other_scheme_is_anonymous() {
        let (_, auth) = setup().await;
        let headers = headers_with("Basic YWxpY2U6c2VjcmV0");
        assert_matches!(current_user(&auth, &headers).await, Ok(None));
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let (db, auth) = setup().await;
        let alice = db
            .users()
            .create(CreateUser {
                username: "alice".to_string(),
                favorite_genre: "sci-fi".to_string(),
            })
            .await
            .unwrap();
        let token = auth.issue_token(&alice).unwrap();

        let user = current_user(&auth, &headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, alice.id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.favorite_genre, "sci-fi");
    }

    #[tokio::test]
    async fn test_bad_token_is_error() {
        let (_, auth) = setup().await;
        let result = current_user(&auth, &headers_with("Bearer not.a.jwt")).await;
        assert_matches!(result, Err(CatalogError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_token_for_missing_user_is_anonymous() {
        let (db, auth) = setup().await;
        let ghost = crate::db::UserRecord {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            username: "ghost".to_string(),
            favorite_genre: "horror".to_string(),
            created_at: String::new(),
        };
        let token = auth.issue_token(&ghost).unwrap();

        let result = current_user(&auth, &headers_with(&format!("Bearer {}", token))).await;
        assert_matches!(result, Ok(None));
        assert!(db.users().get_by_username("ghost").await.unwrap().is_none());
    }
}

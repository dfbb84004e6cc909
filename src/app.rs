//! Application state and HTTP router construction.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::graphql::CatalogSchema;
use crate::services::AuthService;

/// Shared state for HTTP handlers (GraphQL, health).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: CatalogSchema,
    pub auth: AuthService,
}

/// Build the full Axum router: /graphql, health endpoints and layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::graphql::service::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::db::CreateUser;
    use crate::graphql::build_schema;
    use crate::services::AuthConfig;

    async fn test_state() -> AppState {
        let config = Config {
            port: 4000,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            token_lifetime_secs: 3600,
        };
        let db = Database::in_memory().await;
        let auth = AuthService::new(db.clone(), AuthConfig::new(config.jwt_secret.clone()));
        let schema = build_schema(db.clone(), auth.clone());

        AppState {
            config: Arc::new(config),
            db,
            schema,
            auth,
        }
    }

    async fn post_graphql(app: Router, query: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = Body::from(json!({ "query": query }).to_string());

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_token_aborts_request() {
        let state = test_state().await;
        let app = build_app(state.clone());

        let (status, body) = post_graphql(app, "{ bookCount }", Some("not.a.jwt")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("data").map_or(true, Value::is_null), "{}", body);
        assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
        assert_eq!(body["errors"][0]["extensions"]["kind"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_bearer_token_sets_current_user() {
        let state = test_state().await;
        let alice = state
            .db
            .users()
            .create(CreateUser {
                username: "alice".to_string(),
                favorite_genre: "sci-fi".to_string(),
            })
            .await
            .unwrap();
        let token = state.auth.issue_token(&alice).unwrap();
        let app = build_app(state);

        let (_, body) = post_graphql(app.clone(), "{ me { username } }", Some(token.as_str())).await;
        assert_eq!(body["data"], json!({ "me": { "username": "alice" } }));

        let (_, anonymous) = post_graphql(app, "{ me { username } }", None).await;
        assert_eq!(anonymous["data"], json!({ "me": null }));
    }

    #[tokio::test]
    async fn test_login_token_round_trip() {
        let state = test_state().await;
        state
            .db
            .users()
            .create(CreateUser {
                username: "alice".to_string(),
                favorite_genre: "sci-fi".to_string(),
            })
            .await
            .unwrap();
        let app = build_app(state);

        let (_, login) = post_graphql(
            app.clone(),
            r#"mutation { login(username: "alice", password: "secret") { value } }"#,
            None,
        )
        .await;
        let token = login["data"]["login"]["value"].as_str().unwrap().to_string();

        let (status, me) = post_graphql(app, "{ me { username favoriteGenre } }", Some(token.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            me["data"],
            json!({ "me": { "username": "alice", "favoriteGenre": "sci-fi" } })
        );
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = build_app(test_state().await);

        for uri in ["/healthz", "/readyz"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }
}

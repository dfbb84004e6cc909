//! HTTP routes for /graphql
//!
//! The handler resolves the current user from the bearer token before
//! executing. A token that is present but invalid aborts the request.

use async_graphql::http::GraphiQLSource;
use async_graphql::{ErrorExtensions, Pos};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::app::AppState;

use super::context::current_user;

/// Return a router with /graphql. Merge this into the app and call
/// `.with_state(state)` on the combined router.
pub fn router() -> Router<AppState> {
    Router::new().route("/graphql", get(graphiql).post(graphql_handler))
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    match current_user(&state.auth, &headers).await {
        Ok(Some(user)) => request = request.data(user),
        Ok(None) => {}
        Err(e) => {
            let error = e.extend().into_server_error(Pos::default());
            return async_graphql::Response::from_errors(vec![error]).into();
        }
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

//! Bookshelf - GraphQL catalog of books and authors
//!
//! All operations are exposed via GraphQL at /graphql.

mod api;
mod app;
mod config;
mod db;
mod graphql;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppState, build_app};
use crate::config::Config;
use crate::db::Database;
use crate::services::{AuthConfig, AuthService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Bookshelf");

    let config = Arc::new(Config::from_env()?);
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    tracing::info!("Database connected");

    let auth = AuthService::new(
        db.clone(),
        AuthConfig::new(config.jwt_secret.clone()).with_token_lifetime(config.token_lifetime_secs),
    );

    let schema = graphql::build_schema(db.clone(), auth.clone());
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db,
        schema,
        auth,
    };
    let port = state.config.port;
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Server entry point: ensures the database and schema exist, then mounts the
//! common and resource routes under /api.

use axum::Router;
use registrar::{
    apply_migrations, common_routes_with_ready, course_routes, enrollment_routes,
    ensure_database_exists, student_routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("registrar=info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/registrar".into());
    ensure_database_exists(&database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    apply_migrations(&pool).await?;
    let state = AppState { pool };

    let api = Router::new()
        .merge(student_routes(state.clone()))
        .merge(course_routes(state.clone()))
        .merge(enrollment_routes(state.clone()));

    let app = Router::new()
        .merge(common_routes_with_ready(state))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::health::{db_health_check, health_check};
use crate::state::AppState;

/// Full application: API under `/api/v1`, health checks at the root.
pub fn app(state: AppState) -> Router {
    let api = routes::create_router();

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_check))
        .route("/health/db", get(db_health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

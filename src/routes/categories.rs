use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::category::{get_category, list_categories};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
}

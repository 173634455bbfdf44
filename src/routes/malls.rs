use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::mall::{
    get_mall, get_nearest_mall, list_mall_categories, list_mall_shops, list_malls,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/malls", get(list_malls))
        .route("/malls/nearest", get(get_nearest_mall))
        .route("/malls/{id}", get(get_mall))
        .route("/malls/{id}/shops", get(list_mall_shops))
        .route("/malls/{id}/categories", get(list_mall_categories))
}

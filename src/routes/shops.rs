use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::shop::{get_shop, list_shop_malls, list_shops};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shops", get(list_shops))
        .route("/shops/{id}", get(get_shop))
        .route("/shops/{id}/malls", get(list_shop_malls))
}

use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::search::search_malls;

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search_malls))
}

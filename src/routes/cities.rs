use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::city::{get_city, get_nearest_city, list_cities, list_subway_stations};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/cities/nearest", get(get_nearest_city))
        .route("/cities/{id}", get(get_city))
        .route("/cities/{id}/subway_stations", get(list_subway_stations))
}

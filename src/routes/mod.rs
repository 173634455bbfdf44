pub mod categories;
pub mod cities;
pub mod malls;
pub mod search;
pub mod shops;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(cities::routes())
        .merge(malls::routes())
        .merge(shops::routes())
        .merge(categories::routes())
        .merge(search::routes())
}

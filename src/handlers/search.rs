use axum::extract::State;
use axum::Json;

use crate::dtos::search::{parse_shop_ids, SearchQuery};
use crate::dtos::{data, location, DataResponse};
use crate::error::AppError;
use crate::extract::ValidatedQuery;
use crate::handlers::ensure_all_exist;
use crate::models::search::SearchResult;
use crate::queries::exists::Entity;
use crate::queries::search::{self, SearchFilter};
use crate::queries::sort::SearchSort;
use crate::queries::{Page, Paginated, Sorting};
use crate::state::AppState;

pub async fn search_malls(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SearchQuery>,
) -> Result<Json<DataResponse<Paginated<SearchResult>>>, AppError> {
    let shop_ids = parse_shop_ids(params.shop_ids.as_deref().unwrap_or_default())?;
    let sorting = Sorting::<SearchSort>::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);
    let at = location(params.lat, params.lon)?;

    if sorting.key == SearchSort::Distance && at.is_none() {
        return Err(AppError::validation("sorting by distance requires lat and lon"));
    }

    ensure_all_exist(&db_pool, &[(Entity::City, params.city_id)]).await?;

    let filter = SearchFilter {
        shop_ids,
        city_id: params.city_id,
    };
    let results = search::search(&db_pool, &filter, at, sorting, page).await?;
    Ok(data(results))
}

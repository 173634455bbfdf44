use axum::extract::State;
use axum::Json;

use crate::dtos::city::LocationQuery;
use crate::dtos::mall::{MallCategoriesQuery, MallListQuery, MallShopsQuery};
use crate::dtos::{data, location, DataResponse};
use crate::error::{codes, AppError};
use crate::extract::{PathParam, ValidatedQuery};
use crate::handlers::{ensure_all_exist, ensure_exists};
use crate::models::category::Category;
use crate::models::mall::Mall;
use crate::models::shop::Shop;
use crate::queries::category::{self, CategoryFilter};
use crate::queries::exists::Entity;
use crate::queries::mall::{self, MallFilter};
use crate::queries::shop::{self, ShopFilter};
use crate::queries::{Page, Paginated, Sorting};
use crate::state::AppState;

pub async fn list_malls(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<MallListQuery>,
) -> Result<Json<DataResponse<Paginated<Mall>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    ensure_all_exist(
        &db_pool,
        &[
            (Entity::City, params.city_id),
            (Entity::Shop, params.shop_id),
            (Entity::SubwayStation, params.subway_station_id),
        ],
    )
    .await?;

    let filter = MallFilter {
        city_id: params.city_id,
        shop_id: params.shop_id,
        subway_station_id: params.subway_station_id,
        name: params.name,
    };
    let malls = mall::get_malls(&db_pool, &filter, sorting, page).await?;
    Ok(data(malls))
}

pub async fn get_mall(
    State(AppState { db_pool }): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<DataResponse<Mall>>, AppError> {
    let mall = mall::get_mall(&db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(codes::MALL_NOT_FOUND, format!("Mall {id} not found")))?;
    Ok(data(mall))
}

pub async fn get_nearest_mall(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<LocationQuery>,
) -> Result<Json<DataResponse<Mall>>, AppError> {
    let at = location(params.lat, params.lon)?
        .ok_or_else(|| AppError::validation("lat and lon are required"))?;

    let mall = mall::get_nearest_mall(&db_pool, at)
        .await?
        .ok_or_else(|| AppError::not_found(codes::MALL_NOT_FOUND, "No mall covers this location"))?;
    Ok(data(mall))
}

pub async fn list_mall_shops(
    State(AppState { db_pool }): State<AppState>,
    PathParam(mall_id): PathParam<i64>,
    ValidatedQuery(params): ValidatedQuery<MallShopsQuery>,
) -> Result<Json<DataResponse<Paginated<Shop>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    ensure_all_exist(
        &db_pool,
        &[(Entity::Mall, Some(mall_id)), (Entity::Category, params.category_id)],
    )
    .await?;

    let filter = ShopFilter {
        mall_id: Some(mall_id),
        category_id: params.category_id,
        name: params.name,
        ..Default::default()
    };
    let shops = shop::get_shops(&db_pool, &filter, None, sorting, page).await?;
    Ok(data(shops))
}

pub async fn list_mall_categories(
    State(AppState { db_pool }): State<AppState>,
    PathParam(mall_id): PathParam<i64>,
    ValidatedQuery(params): ValidatedQuery<MallCategoriesQuery>,
) -> Result<Json<DataResponse<Paginated<Category>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    ensure_exists(&db_pool, Entity::Mall, mall_id).await?;

    let filter = CategoryFilter {
        mall_id: Some(mall_id),
        ..Default::default()
    };
    let categories = category::get_categories(&db_pool, &filter, sorting, page).await?;
    Ok(data(categories))
}

use axum::extract::State;
use axum::Json;

use crate::dtos::shop::{ShopDetailsQuery, ShopListQuery, ShopMallsQuery};
use crate::dtos::{data, location, DataResponse};
use crate::error::{codes, AppError};
use crate::extract::{PathParam, ValidatedQuery};
use crate::handlers::ensure_all_exist;
use crate::models::mall::Mall;
use crate::models::shop::Shop;
use crate::queries::exists::Entity;
use crate::queries::mall::{self, MallFilter};
use crate::queries::shop::{self, ShopFilter};
use crate::queries::{Page, Paginated, Sorting};
use crate::state::AppState;

pub async fn list_shops(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ShopListQuery>,
) -> Result<Json<DataResponse<Paginated<Shop>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);
    let at = location(params.lat, params.lon)?;

    ensure_all_exist(
        &db_pool,
        &[
            (Entity::City, params.city_id),
            (Entity::Mall, params.mall_id),
            (Entity::Category, params.category_id),
        ],
    )
    .await?;

    let filter = ShopFilter {
        city_id: params.city_id,
        mall_id: params.mall_id,
        category_id: params.category_id,
        name: params.name,
    };
    let shops = shop::get_shops(&db_pool, &filter, at, sorting, page).await?;
    Ok(data(shops))
}

pub async fn get_shop(
    State(AppState { db_pool }): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidatedQuery(params): ValidatedQuery<ShopDetailsQuery>,
) -> Result<Json<DataResponse<Shop>>, AppError> {
    let at = location(params.lat, params.lon)?;

    let shop = shop::get_shop(&db_pool, id, at)
        .await?
        .ok_or_else(|| AppError::not_found(codes::SHOP_NOT_FOUND, format!("Shop {id} not found")))?;
    Ok(data(shop))
}

pub async fn list_shop_malls(
    State(AppState { db_pool }): State<AppState>,
    PathParam(shop_id): PathParam<i64>,
    ValidatedQuery(params): ValidatedQuery<ShopMallsQuery>,
) -> Result<Json<DataResponse<Paginated<Mall>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    ensure_all_exist(
        &db_pool,
        &[(Entity::Shop, Some(shop_id)), (Entity::City, params.city_id)],
    )
    .await?;

    let filter = MallFilter {
        shop_id: Some(shop_id),
        city_id: params.city_id,
        ..Default::default()
    };
    let malls = mall::get_malls(&db_pool, &filter, sorting, page).await?;
    Ok(data(malls))
}

use axum::extract::State;
use axum::Json;

use crate::dtos::category::CategoryListQuery;
use crate::dtos::{data, DataResponse};
use crate::error::{codes, AppError};
use crate::extract::{PathParam, ValidatedQuery};
use crate::handlers::ensure_all_exist;
use crate::models::category::Category;
use crate::queries::category::{self, CategoryFilter};
use crate::queries::exists::Entity;
use crate::queries::{Page, Paginated, Sorting};
use crate::state::AppState;

pub async fn list_categories(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CategoryListQuery>,
) -> Result<Json<DataResponse<Paginated<Category>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    ensure_all_exist(
        &db_pool,
        &[
            (Entity::City, params.city_id),
            (Entity::Shop, params.shop_id),
            (Entity::Mall, params.mall_id),
        ],
    )
    .await?;

    let filter = CategoryFilter {
        city_id: params.city_id,
        shop_id: params.shop_id,
        mall_id: params.mall_id,
    };
    let categories = category::get_categories(&db_pool, &filter, sorting, page).await?;
    Ok(data(categories))
}

pub async fn get_category(
    State(AppState { db_pool }): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<DataResponse<Category>>, AppError> {
    let category = category::get_category(&db_pool, id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(codes::CATEGORY_NOT_FOUND, format!("Category {id} not found"))
        })?;
    Ok(data(category))
}

use axum::extract::State;
use axum::Json;

use crate::dtos::city::{CityListQuery, LocationQuery};
use crate::dtos::{data, location, DataResponse};
use crate::error::{codes, AppError};
use crate::extract::{PathParam, ValidatedQuery};
use crate::handlers::ensure_exists;
use crate::models::city::{City, SubwayStation};
use crate::queries::exists::Entity;
use crate::queries::{city, Page, Paginated, Sorting};
use crate::state::AppState;

pub async fn list_cities(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CityListQuery>,
) -> Result<Json<DataResponse<Paginated<City>>>, AppError> {
    let sorting = Sorting::parse(params.sort.as_deref())?;
    let page = Page::new(params.limit, params.offset);

    let cities = city::get_cities(&db_pool, sorting, page).await?;
    Ok(data(cities))
}

pub async fn get_city(
    State(AppState { db_pool }): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<DataResponse<City>>, AppError> {
    let city = city::get_city(&db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(codes::CITY_NOT_FOUND, format!("City {id} not found")))?;
    Ok(data(city))
}

pub async fn get_nearest_city(
    State(AppState { db_pool }): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<LocationQuery>,
) -> Result<Json<DataResponse<City>>, AppError> {
    let at = location(params.lat, params.lon)?
        .ok_or_else(|| AppError::validation("lat and lon are required"))?;

    let city = city::get_nearest_city(&db_pool, at)
        .await?
        .ok_or_else(|| AppError::not_found(codes::CITY_NOT_FOUND, "No city covers this location"))?;
    Ok(data(city))
}

pub async fn list_subway_stations(
    State(AppState { db_pool }): State<AppState>,
    PathParam(city_id): PathParam<i64>,
) -> Result<Json<DataResponse<Vec<SubwayStation>>>, AppError> {
    ensure_exists(&db_pool, Entity::City, city_id).await?;

    let stations = city::get_subway_stations(&db_pool, city_id).await?;
    Ok(data(stations))
}

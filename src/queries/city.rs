use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use super::builder::{Filter, Fragment, Select};
use super::sort::CitySort;
use super::{geo, Page, Paginated, QueryContext, QueryResult, Sorting};
use crate::models::city::{City, SubwayStation};
use crate::models::Location;

fn city_from_row(row: &PgRow) -> Result<City, sqlx::Error> {
    City::from_row(row)
}

pub fn cities_select(filter: &Filter, sorting: Sorting<CitySort>, page: Page) -> Select<'_> {
    Select {
        columns: Fragment::new("c.id, c.name"),
        from: Fragment::new("city c"),
        count_from: None,
        filter,
        group_by: None,
        order_by: vec![Fragment::new(sorting.order_by())],
        page,
    }
}

pub async fn get_cities(
    pool: &PgPool,
    sorting: Sorting<CitySort>,
    page: Page,
) -> QueryResult<Paginated<City>> {
    let filter = Filter::new();
    cities_select(&filter, sorting, page)
        .fetch_page(pool, "*", "get_cities", city_from_row)
        .await
}

pub async fn get_city(pool: &PgPool, city_id: i64) -> QueryResult<Option<City>> {
    sqlx::query_as::<_, City>("SELECT id, name FROM city WHERE id = $1")
        .bind(city_id)
        .fetch_optional(pool)
        .await
        .context("get_city")
}

pub fn nearest_city_select(filter: &Filter, at: Location) -> Select<'_> {
    Select {
        columns: Fragment::new("c.id, c.name"),
        from: Fragment::new("city c"),
        count_from: None,
        filter,
        group_by: None,
        order_by: vec![],
        page: Page::new(Some(1), None),
    }
    .ordered_by_distance("c.location", "c.id", at)
}

/// The closest city whose declared radius covers `at`.
pub async fn get_nearest_city(pool: &PgPool, at: Location) -> QueryResult<Option<City>> {
    let filter = Filter::new().and(geo::within_radius("c.location", "c.radius", at));
    let row = nearest_city_select(&filter, at)
        .build()
        .context("get_nearest_city")?
        .build()
        .fetch_optional(pool)
        .await
        .context("get_nearest_city")?;

    row.as_ref()
        .map(city_from_row)
        .transpose()
        .context("get_nearest_city")
}

pub async fn get_subway_stations(pool: &PgPool, city_id: i64) -> QueryResult<Vec<SubwayStation>> {
    sqlx::query_as::<_, SubwayStation>(
        r#"SELECT id, name
        FROM subway_station
        WHERE city_id = $1
        ORDER BY name ASC, id ASC"#,
    )
    .bind(city_id)
    .fetch_all(pool)
    .await
    .context("get_subway_stations")
}

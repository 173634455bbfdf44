use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MallListQuery {
    #[validate(range(min = 0))]
    pub city_id: Option<i64>,
    #[validate(range(min = 0))]
    pub shop_id: Option<i64>,
    #[validate(range(min = 0))]
    pub subway_station_id: Option<i64>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MallShopsQuery {
    #[validate(range(min = 0))]
    pub category_id: Option<i64>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MallCategoriesQuery {
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShopListQuery {
    #[validate(range(min = 0))]
    pub city_id: Option<i64>,
    #[validate(range(min = 0))]
    pub mall_id: Option<i64>,
    #[validate(range(min = 0))]
    pub category_id: Option<i64>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShopDetailsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShopMallsQuery {
    #[validate(range(min = 0))]
    pub city_id: Option<i64>,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

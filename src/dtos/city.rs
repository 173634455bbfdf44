use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CityListQuery {
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(required(message = "lat is required"), range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(required(message = "lon is required"), range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CategoryListQuery {
    #[validate(range(min = 0))]
    pub city_id: Option<i64>,
    #[validate(range(min = 0))]
    pub shop_id: Option<i64>,
    #[validate(range(min = 0))]
    pub mall_id: Option<i64>,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

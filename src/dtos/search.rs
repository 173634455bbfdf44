use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchQuery {
    /// Comma separated shop ids, e.g. `shop_ids=3,7,11`.
    #[validate(required(message = "shop_ids is required"))]
    pub shop_ids: Option<String>,
    #[validate(range(min = 0))]
    pub city_id: Option<i64>,
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

/// Parses `3,7,11` into a non-empty, de-duplicated id list.
pub fn parse_shop_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let id: i64 = part
            .parse()
            .map_err(|_| AppError::validation(format!("shop_ids: '{part}' is not an integer")))?;
        if id < 0 {
            return Err(AppError::validation("shop_ids must be non-negative"));
        }
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(AppError::validation("shop_ids must contain at least one id"));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_dedups() {
        assert_eq!(parse_shop_ids("3, 7,3,,11").unwrap(), vec![3, 7, 11]);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(parse_shop_ids("").is_err());
        assert!(parse_shop_ids(" , ").is_err());
        assert!(parse_shop_ids("3,x").is_err());
        assert!(parse_shop_ids("-1").is_err());
    }
}

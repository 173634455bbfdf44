pub mod category;
pub mod city;
pub mod mall;
pub mod search;
pub mod shop;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Location;

/// `{"data": ...}` success envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

pub fn data<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}

/// `lat` and `lon` travel together and must be finite. Range checks on the
/// DTOs let `NaN` through.
pub fn location(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Location>, AppError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) if !(lat.is_finite() && lon.is_finite()) => {
            Err(AppError::validation("lat and lon must be finite numbers"))
        }
        (Some(lat), Some(lon)) => Ok(Some(Location { lat, lon })),
        (None, None) => Ok(None),
        _ => Err(AppError::validation("lat and lon must be provided together")),
    }
}

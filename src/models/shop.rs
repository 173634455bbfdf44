use serde::{Deserialize, Serialize};

use super::Location;

/// The mall carrying a shop that is closest to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestMall {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: Location,
    /// Metres, measured in the projected (EPSG:3857) plane.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub score: Option<f64>,
    pub malls_count: i64,
    pub phone: Option<String>,
    pub site: Option<String>,
    pub nearest_mall: Option<NearestMall>,
}

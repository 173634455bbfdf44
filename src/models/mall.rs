use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::city::SubwayStation;
use super::Location;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub small: Option<String>,
    pub large: Option<String>,
}

/// A weekday (0 = Sunday) and time of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTime {
    pub day: i16,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingPeriod {
    pub open: DayTime,
    pub close: DayTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mall {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub logo: Logo,
    pub location: Location,
    pub shops_count: i64,
    pub address: String,
    pub site: Option<String>,
    pub day_and_night: bool,
    pub subway_station: Option<SubwayStation>,
    /// Only populated on the details endpoint, and only for malls that are
    /// not open around the clock.
    pub working_hours: Option<Vec<WorkingPeriod>>,
}

//! Flat rows to domain entities.

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::models::city::SubwayStation;
use crate::models::mall::{DayTime, Logo, Mall, WorkingPeriod};
use crate::models::search::SearchResult;
use crate::models::shop::{NearestMall, Shop};
use crate::models::Location;

/// Select list matching [`mall_from_row`]. Expects `mall m` and a left
/// joined `subway_station ss`.
pub const MALL_COLUMNS: &str = "m.id, m.name, m.phone, m.logo_small, m.logo_large, \
     ST_Y(m.location) AS lat, ST_X(m.location) AS lon, \
     m.shops_count, m.address, m.site, m.day_and_night, \
     ss.id AS subway_station_id, ss.name AS subway_station_name";

pub const MALL_SOURCE: &str = "mall m LEFT JOIN subway_station ss ON ss.id = m.subway_station_id";

pub const SHOP_COLUMNS: &str = "s.id, s.name, s.logo, s.score, s.malls_count, s.phone, s.site";

/// Both halves must be present, a lone id or name is dropped.
pub fn subway_station(id: Option<i64>, name: Option<String>) -> Option<SubwayStation> {
    match (id, name) {
        (Some(id), Some(name)) => Some(SubwayStation { id, name }),
        _ => None,
    }
}

pub fn mall_from_row(row: &PgRow) -> Result<Mall, sqlx::Error> {
    Ok(Mall {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        logo: Logo {
            small: row.try_get("logo_small")?,
            large: row.try_get("logo_large")?,
        },
        location: Location {
            lat: row.try_get("lat")?,
            lon: row.try_get("lon")?,
        },
        shops_count: row.try_get("shops_count")?,
        address: row.try_get("address")?,
        site: row.try_get("site")?,
        day_and_night: row.try_get("day_and_night")?,
        subway_station: subway_station(
            row.try_get("subway_station_id")?,
            row.try_get("subway_station_name")?,
        ),
        working_hours: None,
    })
}

pub fn working_period_from_row(row: &PgRow) -> Result<WorkingPeriod, sqlx::Error> {
    Ok(WorkingPeriod {
        open: DayTime {
            day: row.try_get("open_day")?,
            time: row.try_get("open_time")?,
        },
        close: DayTime {
            day: row.try_get("close_day")?,
            time: row.try_get("close_time")?,
        },
    })
}

/// Flat `nearest_mall_*` columns of a shop row.
#[derive(Debug, Default)]
pub struct NearestMallColumns {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub distance: Option<f64>,
}

impl NearestMallColumns {
    pub fn into_nearest(self) -> Option<NearestMall> {
        Some(NearestMall {
            id: self.id?,
            name: self.name?,
            address: self.address?,
            location: Location {
                lat: self.lat?,
                lon: self.lon?,
            },
            distance: self.distance?,
        })
    }
}

pub fn shop_from_row(row: &PgRow) -> Result<Shop, sqlx::Error> {
    let nearest = NearestMallColumns {
        id: row.try_get("nearest_mall_id")?,
        name: row.try_get("nearest_mall_name")?,
        address: row.try_get("nearest_mall_address")?,
        lat: row.try_get("nearest_mall_lat")?,
        lon: row.try_get("nearest_mall_lon")?,
        distance: row.try_get("nearest_mall_distance")?,
    };

    Ok(Shop {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        logo: row.try_get("logo")?,
        score: row.try_get("score")?,
        malls_count: row.try_get("malls_count")?,
        phone: row.try_get("phone")?,
        site: row.try_get("site")?,
        nearest_mall: nearest.into_nearest(),
    })
}

pub fn search_result_from_row(row: &PgRow) -> Result<SearchResult, sqlx::Error> {
    let shop_ids: Option<Vec<i64>> = row.try_get("shop_ids")?;
    Ok(SearchResult {
        mall: mall_from_row(row)?,
        shop_ids: shop_ids.unwrap_or_default(),
        distance: row.try_get("distance")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subway_station_requires_both_fields() {
        assert_eq!(
            subway_station(Some(4), Some("Okhotny Ryad".to_string())),
            Some(SubwayStation { id: 4, name: "Okhotny Ryad".to_string() })
        );
        assert_eq!(subway_station(Some(4), None), None);
        assert_eq!(subway_station(None, Some("Arbatskaya".to_string())), None);
        assert_eq!(subway_station(None, None), None);
    }

    #[test]
    fn nearest_mall_is_all_or_nothing() {
        assert_eq!(NearestMallColumns::default().into_nearest(), None);

        let partial = NearestMallColumns {
            id: Some(1),
            name: Some("Atrium".to_string()),
            address: Some("Zemlyanoy Val, 33".to_string()),
            lat: Some(55.75),
            lon: Some(37.66),
            distance: None,
        };
        assert_eq!(partial.into_nearest(), None);

        let full = NearestMallColumns {
            id: Some(1),
            name: Some("Atrium".to_string()),
            address: Some("Zemlyanoy Val, 33".to_string()),
            lat: Some(55.75),
            lon: Some(37.66),
            distance: Some(812.5),
        };
        let nearest = full.into_nearest().unwrap();
        assert_eq!(nearest.id, 1);
        assert_eq!(nearest.location, Location { lat: 55.75, lon: 37.66 });
        assert_eq!(nearest.distance, 812.5);
    }
}

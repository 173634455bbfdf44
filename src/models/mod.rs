pub mod category;
pub mod city;
pub mod mall;
pub mod search;
pub mod shop;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde_json::json;

    use super::city::SubwayStation;
    use super::mall::{DayTime, Logo, Mall, WorkingPeriod};
    use super::search::SearchResult;
    use super::*;

    fn mall() -> Mall {
        Mall {
            id: 12,
            name: "Tc Center".to_string(),
            phone: Some("+7 495 000-00-00".to_string()),
            logo: Logo {
                small: Some("https://cdn.example/12/s.png".to_string()),
                large: None,
            },
            location: Location { lat: 55.75, lon: 37.61 },
            shops_count: 140,
            address: "Tverskaya, 1".to_string(),
            site: None,
            day_and_night: false,
            subway_station: Some(SubwayStation {
                id: 3,
                name: "Tverskaya".to_string(),
            }),
            working_hours: Some(vec![WorkingPeriod {
                open: DayTime {
                    day: 1,
                    time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                },
                close: DayTime {
                    day: 1,
                    time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                },
            }]),
        }
    }

    #[test]
    fn mall_json_shape() {
        let value = serde_json::to_value(mall()).unwrap();
        assert_eq!(value["logo"], json!({"small": "https://cdn.example/12/s.png", "large": null}));
        assert_eq!(value["location"], json!({"lat": 55.75, "lon": 37.61}));
        assert_eq!(value["subway_station"], json!({"id": 3, "name": "Tverskaya"}));
        assert_eq!(value["working_hours"][0]["open"], json!({"day": 1, "time": "10:00:00"}));

        let back: Mall = serde_json::from_value(value).unwrap();
        assert_eq!(back, mall());
    }

    #[test]
    fn search_result_without_location_has_null_distance() {
        let result = SearchResult {
            mall: mall(),
            shop_ids: vec![],
            distance: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["shop_ids"], json!([]));
        assert!(value["distance"].is_null());
        assert_eq!(value["mall"]["id"], 12);
    }
}

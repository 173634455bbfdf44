//! PostGIS expressions. Stored points are SRID 4326; every distance and
//! radius check happens in the EPSG:3857 plane so that the containment test
//! and the ordering agree.

use super::builder::Fragment;
use crate::models::Location;

const PROJECTED_SRID: i32 = 3857;

fn projected_caller() -> String {
    format!("ST_Transform(ST_SetSRID(ST_MakePoint(?, ?), 4326), {PROJECTED_SRID})")
}

fn projected(column: &str) -> String {
    format!("ST_Transform({column}, {PROJECTED_SRID})")
}

/// Planar distance in metres between `column` and the caller.
pub fn distance_to(column: &str, at: Location) -> Fragment {
    Fragment::new(format!(
        "ST_Distance({}, {})",
        projected(column),
        projected_caller()
    ))
    .bind(at.lon)
    .bind(at.lat)
}

/// True when the caller lies within `radius_column` metres of `column`.
pub fn within_radius(column: &str, radius_column: &str, at: Location) -> Fragment {
    Fragment::new(format!(
        "ST_DWithin({}, {}, {radius_column})",
        projected(column),
        projected_caller()
    ))
    .bind(at.lon)
    .bind(at.lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::builder::Arg;

    #[test]
    fn containment_and_distance_share_projection() {
        let at = Location { lat: 55.75, lon: 37.61 };
        let distance = distance_to("m.location", at);
        let within = within_radius("m.location", "m.radius", at);

        let projected_point = "ST_Transform(ST_SetSRID(ST_MakePoint(?, ?), 4326), 3857)";
        assert!(distance.sql().contains(projected_point));
        assert!(within.sql().contains(projected_point));
        assert!(distance.sql().contains("ST_Transform(m.location, 3857)"));
        assert!(within.sql().contains("ST_Transform(m.location, 3857)"));
        assert!(within.sql().ends_with(", m.radius)"));
    }

    #[test]
    fn binds_longitude_first() {
        let at = Location { lat: 10.0, lon: 20.0 };
        assert_eq!(distance_to("c.location", at).args(), &[Arg::Float(20.0), Arg::Float(10.0)]);
    }
}

use sqlx::PgPool;

use super::builder::{Filter, Fragment, Select};
use super::mapper::{self, MALL_COLUMNS};
use super::sort::SearchSort;
use super::{geo, Page, Paginated, QueryResult, Sorting};
use crate::models::search::SearchResult;
use crate::models::Location;

const SEARCH_SOURCE: &str = "mall m JOIN mall_shop ms ON ms.mall_id = m.id \
     LEFT JOIN subway_station ss ON ss.id = m.subway_station_id";

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub shop_ids: Vec<i64>,
    pub city_id: Option<i64>,
}

impl SearchFilter {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .and(Fragment::new("ms.shop_id = ANY(?)").bind(self.shop_ids.clone()))
            .and_some(self.city_id, |id| Fragment::new("m.city_id = ?").bind(id))
    }
}

/// Malls carrying any of the requested shops, most matches first, then the
/// chosen key. `distance` is NULL without a caller location.
pub fn search_select(
    filter: &Filter,
    at: Option<Location>,
    sorting: Sorting<SearchSort>,
    page: Page,
) -> Select<'_> {
    let distance = match at {
        Some(at) => geo::distance_to("m.location", at),
        None => Fragment::new("NULL::float8"),
    };

    let mut columns = Fragment::new(format!(
        "{MALL_COLUMNS}, array_agg(DISTINCT ms.shop_id) AS shop_ids, \
         COUNT(DISTINCT ms.shop_id) AS matched_count, {} AS distance",
        distance.sql()
    ));
    for arg in distance.args() {
        columns = columns.bind(arg.clone());
    }

    Select {
        columns,
        from: Fragment::new(SEARCH_SOURCE),
        count_from: None,
        filter,
        group_by: Some("m.id, ss.id"),
        order_by: vec![
            Fragment::new("matched_count DESC"),
            Fragment::new(sorting.order_by()),
        ],
        page,
    }
}

pub async fn search(
    pool: &PgPool,
    params: &SearchFilter,
    at: Option<Location>,
    sorting: Sorting<SearchSort>,
    page: Page,
) -> QueryResult<Paginated<SearchResult>> {
    let filter = params.to_filter();
    search_select(&filter, at, sorting, page)
        .fetch_page(pool, "DISTINCT m.id", "search", mapper::search_result_from_row)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchFilter {
        SearchFilter {
            shop_ids: vec![3, 7, 11],
            city_id: Some(1),
        }
    }

    #[test]
    fn orders_by_match_count_then_key() {
        let filter = params().to_filter();
        let sorting = Sorting::<SearchSort>::parse(Some("-mall_name")).unwrap();
        let sql = search_select(&filter, None, sorting, Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();

        assert!(sql.contains("NULL::float8 AS distance"));
        assert!(sql.contains("WHERE ms.shop_id = ANY($1) AND m.city_id = $2 GROUP BY m.id, ss.id"));
        assert!(sql.ends_with("ORDER BY matched_count DESC, m.name DESC"));
    }

    #[test]
    fn distance_binds_lead_the_query() {
        let filter = params().to_filter();
        let at = Some(Location { lat: 55.7, lon: 37.6 });
        let sorting = Sorting::<SearchSort>::parse(Some("distance")).unwrap();
        let sql = search_select(&filter, at, sorting, Page::new(Some(10), None))
            .build()
            .unwrap()
            .sql()
            .to_string();

        assert!(sql.contains("ST_MakePoint($1, $2)"));
        assert!(sql.contains("WHERE ms.shop_id = ANY($3) AND m.city_id = $4"));
        assert!(sql.ends_with("ORDER BY matched_count DESC, distance ASC LIMIT $5"));
    }

    #[test]
    fn count_is_distinct_over_malls() {
        let filter = params().to_filter();
        let select = search_select(&filter, None, Sorting::default(), Page::default());
        let sql = select.build_count("DISTINCT m.id").unwrap().sql().to_string();
        assert!(sql.starts_with("SELECT COUNT(DISTINCT m.id) FROM mall m JOIN mall_shop ms"));
        assert!(!sql.contains("GROUP BY"));
    }
}

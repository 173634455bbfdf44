use sqlx::PgPool;

use super::builder::{contains_pattern, Filter, Fragment, Select};
use super::mapper::{self, SHOP_COLUMNS};
use super::sort::ShopSort;
use super::{geo, Page, Paginated, QueryContext, QueryResult, Sorting};
use crate::models::shop::Shop;
use crate::models::Location;

#[derive(Debug, Clone, Default)]
pub struct ShopFilter {
    pub city_id: Option<i64>,
    pub mall_id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: Option<String>,
}

impl ShopFilter {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .and_some(self.city_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM mall_shop ms JOIN mall m ON m.id = ms.mall_id \
                     WHERE ms.shop_id = s.id AND m.city_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.mall_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM mall_shop ms WHERE ms.shop_id = s.id AND ms.mall_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.category_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM shop_category sc WHERE sc.shop_id = s.id AND sc.category_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.name.as_deref(), name_clause)
    }
}

/// Matches the shop name or any of its aliases.
pub fn name_clause(name: &str) -> Fragment {
    let pattern = contains_pattern(name);
    Fragment::new(
        "(s.name ILIKE ? OR EXISTS (SELECT 1 FROM shop_name sn WHERE sn.shop_id = s.id AND sn.name ILIKE ?))",
    )
    .bind(pattern.clone())
    .bind(pattern)
}

const NO_NEAREST_MALL: &str = "NULL::bigint AS nearest_mall_id, NULL::text AS nearest_mall_name, \
     NULL::text AS nearest_mall_address, NULL::float8 AS nearest_mall_lat, \
     NULL::float8 AS nearest_mall_lon, NULL::float8 AS nearest_mall_distance";

const NEAREST_MALL_COLUMNS: &str = "nm.id AS nearest_mall_id, nm.name AS nearest_mall_name, \
     nm.address AS nearest_mall_address, nm.lat AS nearest_mall_lat, \
     nm.lon AS nearest_mall_lon, nm.distance AS nearest_mall_distance";

/// `shop s`, plus a lateral lookup of the closest mall carrying each shop
/// when the caller sent a location. `city_id` narrows that lookup.
fn shop_source(at: Option<Location>, city_id: Option<i64>) -> (Fragment, Fragment) {
    let Some(at) = at else {
        return (
            Fragment::new(format!("{SHOP_COLUMNS}, {NO_NEAREST_MALL}")),
            Fragment::new("shop s"),
        );
    };

    let distance = geo::distance_to("m.location", at);
    let mut lateral = format!(
        "shop s LEFT JOIN LATERAL (SELECT m.id, m.name, m.address, \
         ST_Y(m.location) AS lat, ST_X(m.location) AS lon, {} AS distance \
         FROM mall m JOIN mall_shop ms ON ms.mall_id = m.id \
         WHERE ms.shop_id = s.id",
        distance.sql()
    );
    if city_id.is_some() {
        lateral.push_str(" AND m.city_id = ?");
    }
    lateral.push_str(" ORDER BY distance ASC, m.id ASC LIMIT 1) nm ON TRUE");

    let mut from = Fragment::new(lateral);
    for arg in distance.args() {
        from = from.bind(arg.clone());
    }
    if let Some(city_id) = city_id {
        from = from.bind(city_id);
    }

    (
        Fragment::new(format!("{SHOP_COLUMNS}, {NEAREST_MALL_COLUMNS}")),
        from,
    )
}

pub fn shops_select(
    filter: &Filter,
    at: Option<Location>,
    city_id: Option<i64>,
    sorting: Sorting<ShopSort>,
    page: Page,
) -> Select<'_> {
    let (columns, from) = shop_source(at, city_id);
    Select {
        columns,
        from,
        count_from: Some(Fragment::new("shop s")),
        filter,
        group_by: None,
        order_by: vec![Fragment::new(sorting.order_by())],
        page,
    }
}

pub async fn get_shops(
    pool: &PgPool,
    params: &ShopFilter,
    at: Option<Location>,
    sorting: Sorting<ShopSort>,
    page: Page,
) -> QueryResult<Paginated<Shop>> {
    let filter = params.to_filter();
    shops_select(&filter, at, params.city_id, sorting, page)
        .fetch_page(pool, "*", "get_shops", mapper::shop_from_row)
        .await
}

pub async fn get_shop(
    pool: &PgPool,
    shop_id: i64,
    at: Option<Location>,
) -> QueryResult<Option<Shop>> {
    let filter = Filter::new().and(Fragment::new("s.id = ?").bind(shop_id));
    let row = shops_select(&filter, at, None, Sorting::default(), Page::default())
        .build()
        .context("get_shop")?
        .build()
        .fetch_optional(pool)
        .await
        .context("get_shop")?;

    row.as_ref()
        .map(mapper::shop_from_row)
        .transpose()
        .context("get_shop")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_location_nearest_mall_columns_are_null() {
        let filter = ShopFilter::default().to_filter();
        let sql = shops_select(&filter, None, None, Sorting::default(), Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();

        assert!(sql.contains("NULL::bigint AS nearest_mall_id"));
        assert!(sql.contains("FROM shop s ORDER BY s.id ASC"));
        assert!(!sql.contains("LATERAL"));
    }

    #[test]
    fn location_and_city_bind_before_filters() {
        let params = ShopFilter {
            city_id: Some(3),
            category_id: Some(8),
            ..Default::default()
        };
        let filter = params.to_filter();
        let sorting = Sorting::<ShopSort>::parse(Some("-score")).unwrap();
        let at = Some(Location { lat: 59.93, lon: 30.31 });
        let sql = shops_select(&filter, at, params.city_id, sorting, Page::new(Some(20), Some(40)))
            .build()
            .unwrap()
            .sql()
            .to_string();

        assert!(sql.contains("LEFT JOIN LATERAL"));
        assert!(sql.contains("ST_MakePoint($1, $2)"));
        assert!(sql.contains("WHERE ms.shop_id = s.id AND m.city_id = $3 ORDER BY distance ASC, m.id ASC LIMIT 1) nm ON TRUE"));
        assert!(sql.contains(" WHERE EXISTS (SELECT 1 FROM mall_shop ms JOIN mall m ON m.id = ms.mall_id WHERE ms.shop_id = s.id AND m.city_id = $4)"));
        assert!(sql.contains("AND EXISTS (SELECT 1 FROM shop_category sc WHERE sc.shop_id = s.id AND sc.category_id = $5)"));
        assert!(sql.ends_with("ORDER BY s.score DESC LIMIT $6 OFFSET $7"));
    }

    #[test]
    fn count_skips_the_nearest_mall_lookup() {
        let params = ShopFilter {
            city_id: Some(3),
            ..Default::default()
        };
        let filter = params.to_filter();
        let at = Some(Location { lat: 59.93, lon: 30.31 });
        let count = shops_select(&filter, at, params.city_id, Sorting::default(), Page::new(Some(20), None))
            .build_count("*")
            .unwrap()
            .sql()
            .to_string();

        assert!(count.starts_with("SELECT COUNT(*) FROM shop s WHERE EXISTS"));
        assert!(count.ends_with("m.city_id = $1)"));
        assert!(!count.contains("LATERAL"));
    }

    #[test]
    fn name_search_covers_aliases() {
        let params = ShopFilter {
            name: Some("zara".to_string()),
            ..Default::default()
        };
        let sql = shops_select(&params.to_filter(), None, None, Sorting::default(), Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();
        assert!(sql.contains("s.name ILIKE $1 OR EXISTS (SELECT 1 FROM shop_name sn"));
    }
}

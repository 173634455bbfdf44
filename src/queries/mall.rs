use sqlx::PgPool;

use super::builder::{contains_pattern, Filter, Fragment, Select};
use super::mapper::{self, MALL_COLUMNS, MALL_SOURCE};
use super::sort::MallSort;
use super::{geo, Page, Paginated, QueryContext, QueryResult, Sorting};
use crate::models::mall::{Mall, WorkingPeriod};
use crate::models::Location;

#[derive(Debug, Clone, Default)]
pub struct MallFilter {
    pub city_id: Option<i64>,
    pub shop_id: Option<i64>,
    pub subway_station_id: Option<i64>,
    pub name: Option<String>,
}

/// Matches the mall name or any of its aliases.
pub fn name_clause(name: &str) -> Fragment {
    let pattern = contains_pattern(name);
    Fragment::new(
        "(m.name ILIKE ? OR EXISTS (SELECT 1 FROM mall_name mn WHERE mn.mall_id = m.id AND mn.name ILIKE ?))",
    )
    .bind(pattern.clone())
    .bind(pattern)
}

impl MallFilter {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .and_some(self.city_id, |id| Fragment::new("m.city_id = ?").bind(id))
            .and_some(self.shop_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM mall_shop ms WHERE ms.mall_id = m.id AND ms.shop_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.subway_station_id, |id| {
                Fragment::new("m.subway_station_id = ?").bind(id)
            })
            .and_some(self.name.as_deref(), name_clause)
    }
}

pub fn malls_select(filter: &Filter, sorting: Sorting<MallSort>, page: Page) -> Select<'_> {
    Select {
        columns: Fragment::new(MALL_COLUMNS),
        from: Fragment::new(MALL_SOURCE),
        count_from: None,
        filter,
        group_by: None,
        order_by: vec![Fragment::new(sorting.order_by())],
        page,
    }
}

pub async fn get_malls(
    pool: &PgPool,
    params: &MallFilter,
    sorting: Sorting<MallSort>,
    page: Page,
) -> QueryResult<Paginated<Mall>> {
    let filter = params.to_filter();
    malls_select(&filter, sorting, page)
        .fetch_page(pool, "*", "get_malls", mapper::mall_from_row)
        .await
}

/// Mall details. Working hours are loaded only for malls that are not open
/// around the clock.
pub async fn get_mall(pool: &PgPool, mall_id: i64) -> QueryResult<Option<Mall>> {
    let filter = Filter::new().and(Fragment::new("m.id = ?").bind(mall_id));
    let row = malls_select(&filter, Sorting::default(), Page::default())
        .build()
        .context("get_mall")?
        .build()
        .fetch_optional(pool)
        .await
        .context("get_mall")?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut mall = mapper::mall_from_row(&row).context("get_mall")?;

    if !mall.day_and_night {
        mall.working_hours = Some(get_working_hours(pool, mall.id).await?);
    }

    Ok(Some(mall))
}

pub async fn get_working_hours(pool: &PgPool, mall_id: i64) -> QueryResult<Vec<WorkingPeriod>> {
    let rows = sqlx::query(
        r#"SELECT open_day, open_time, close_day, close_time
        FROM working_hours
        WHERE mall_id = $1
        ORDER BY open_day ASC, open_time ASC"#,
    )
    .bind(mall_id)
    .fetch_all(pool)
    .await
    .context("get_working_hours")?;

    rows.iter()
        .map(mapper::working_period_from_row)
        .collect::<Result<Vec<_>, _>>()
        .context("get_working_hours")
}

pub fn nearest_mall_select(filter: &Filter, at: Location) -> Select<'_> {
    Select {
        columns: Fragment::new(MALL_COLUMNS),
        from: Fragment::new(MALL_SOURCE),
        count_from: None,
        filter,
        group_by: None,
        order_by: vec![],
        page: Page::new(Some(1), None),
    }
    .ordered_by_distance("m.location", "m.id", at)
}

/// The closest mall whose declared radius covers `at`.
pub async fn get_nearest_mall(pool: &PgPool, at: Location) -> QueryResult<Option<Mall>> {
    let filter = Filter::new().and(geo::within_radius("m.location", "m.radius", at));
    let row = nearest_mall_select(&filter, at)
        .build()
        .context("get_nearest_mall")?
        .build()
        .fetch_optional(pool)
        .await
        .context("get_nearest_mall")?;

    row.as_ref()
        .map(mapper::mall_from_row)
        .transpose()
        .context("get_nearest_mall")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malls_by_shop_and_city() {
        let params = MallFilter {
            city_id: Some(2),
            shop_id: Some(5),
            ..Default::default()
        };
        let filter = params.to_filter();
        let select = malls_select(&filter, Sorting::default(), Page::new(Some(10), Some(0)));

        let sql = select.build().unwrap().sql().to_string();
        assert!(sql.contains(" WHERE m.city_id = $1 AND EXISTS (SELECT 1 FROM mall_shop ms WHERE ms.mall_id = m.id AND ms.shop_id = $2)"));
        assert!(sql.ends_with(" ORDER BY m.id ASC LIMIT $3"));

        let count = select.build_count("*").unwrap().sql().to_string();
        assert!(count.starts_with("SELECT COUNT(*) FROM mall m LEFT JOIN subway_station ss"));
        assert!(!count.contains("LIMIT"));
    }

    #[test]
    fn malls_by_name_without_city() {
        let params = MallFilter {
            name: Some("tc".to_string()),
            ..Default::default()
        };
        let filter = params.to_filter();
        let sorting = Sorting::<MallSort>::parse(Some("-shops_count")).unwrap();
        let sql = malls_select(&filter, sorting, Page::default()).build().unwrap().sql().to_string();

        assert!(sql.contains("WHERE (m.name ILIKE $1 OR EXISTS (SELECT 1 FROM mall_name mn WHERE mn.mall_id = m.id AND mn.name ILIKE $2))"));
        assert!(!sql.contains("m.city_id"));
        assert!(sql.ends_with("ORDER BY m.shops_count DESC"));
    }

    #[test]
    fn name_clause_binds_same_pattern_twice() {
        let clause = name_clause("tc");
        assert_eq!(clause.args().len(), 2);
        assert_eq!(clause.args()[0], clause.args()[1]);
    }

    #[test]
    fn nearest_mall_orders_by_projected_distance() {
        let at = Location { lat: 55.75, lon: 37.61 };
        let filter = Filter::new().and(geo::within_radius("m.location", "m.radius", at));
        let sql = nearest_mall_select(&filter, at).build().unwrap().sql().to_string();

        assert!(sql.contains("WHERE ST_DWithin(ST_Transform(m.location, 3857), ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), 4326), 3857), m.radius)"));
        assert!(sql.contains("ORDER BY ST_Distance(ST_Transform(m.location, 3857), ST_Transform(ST_SetSRID(ST_MakePoint($3, $4), 4326), 3857)) ASC, m.id ASC LIMIT $5"));
    }
}

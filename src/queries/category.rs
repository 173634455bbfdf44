use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use super::builder::{Filter, Fragment, Select};
use super::sort::CategorySort;
use super::{Page, Paginated, QueryContext, QueryResult, Sorting};
use crate::models::category::Category;

const CATEGORY_COLUMNS: &str = "c.id, c.name, c.logo, c.shops_count";

#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub city_id: Option<i64>,
    pub shop_id: Option<i64>,
    pub mall_id: Option<i64>,
}

impl CategoryFilter {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .and_some(self.city_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM shop_category sc \
                     JOIN mall_shop ms ON ms.shop_id = sc.shop_id \
                     JOIN mall m ON m.id = ms.mall_id \
                     WHERE sc.category_id = c.id AND m.city_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.shop_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM shop_category sc WHERE sc.category_id = c.id AND sc.shop_id = ?)",
                )
                .bind(id)
            })
            .and_some(self.mall_id, |id| {
                Fragment::new(
                    "EXISTS (SELECT 1 FROM shop_category sc \
                     JOIN mall_shop ms ON ms.shop_id = sc.shop_id \
                     WHERE sc.category_id = c.id AND ms.mall_id = ?)",
                )
                .bind(id)
            })
    }
}

pub fn categories_select(filter: &Filter, sorting: Sorting<CategorySort>, page: Page) -> Select<'_> {
    Select {
        columns: Fragment::new(CATEGORY_COLUMNS),
        from: Fragment::new("category c"),
        count_from: None,
        filter,
        group_by: None,
        order_by: vec![Fragment::new(sorting.order_by())],
        page,
    }
}

pub async fn get_categories(
    pool: &PgPool,
    params: &CategoryFilter,
    sorting: Sorting<CategorySort>,
    page: Page,
) -> QueryResult<Paginated<Category>> {
    let filter = params.to_filter();
    categories_select(&filter, sorting, page)
        .fetch_page(pool, "*", "get_categories", |row: &PgRow| {
            Category::from_row(row)
        })
        .await
}

pub async fn get_category(pool: &PgPool, category_id: i64) -> QueryResult<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"SELECT id, name, logo, shops_count
        FROM category
        WHERE id = $1"#,
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await
    .context("get_category")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_categories_sorted_by_shops_count_desc() {
        let filter = CategoryFilter::default().to_filter();
        let sorting = Sorting::<CategorySort>::parse(Some("-shops_count")).unwrap();
        let sql = categories_select(&filter, sorting, Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();
        assert_eq!(
            sql,
            "SELECT c.id, c.name, c.logo, c.shops_count FROM category c ORDER BY c.shops_count DESC"
        );
    }

    #[test]
    fn default_sort_is_id_ascending() {
        let filter = CategoryFilter::default().to_filter();
        let sql = categories_select(&filter, Sorting::default(), Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();
        assert!(sql.ends_with("ORDER BY c.id ASC"));
    }

    #[test]
    fn city_and_shop_filters() {
        let params = CategoryFilter {
            city_id: Some(1),
            shop_id: Some(9),
            mall_id: None,
        };
        let sql = categories_select(&params.to_filter(), Sorting::default(), Page::default())
            .build()
            .unwrap()
            .sql()
            .to_string();
        assert!(sql.contains("m.city_id = $1)"));
        assert!(sql.contains("AND EXISTS (SELECT 1 FROM shop_category sc WHERE sc.category_id = c.id AND sc.shop_id = $2)"));
    }
}

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::pagination::{Page, Paginated};
use super::{geo, QueryContext, QueryResult};
use crate::models::Location;

/// Placeholder marking a bind position inside a [`Fragment`].
const PLACEHOLDER: char = '?';

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Text(String),
    IntList(Vec<i64>),
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<Vec<i64>> for Arg {
    fn from(value: Vec<i64>) -> Self {
        Arg::IntList(value)
    }
}

/// A piece of SQL with `?` placeholders and the values bound to them, in
/// order. Positions are renumbered to `$n` when pushed into a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    sql: String,
    args: Vec<Arg>,
}

impl Fragment {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn bind(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn append(mut self, sql: &str) -> Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends the SQL to `qb`, binding each value at its placeholder.
    /// Fails when the placeholder and value counts disagree.
    pub fn push_to(&self, qb: &mut QueryBuilder<'static, Postgres>) -> Result<(), sqlx::Error> {
        let placeholders = self.sql.matches(PLACEHOLDER).count();
        if placeholders != self.args.len() {
            return Err(sqlx::Error::InvalidArgument(format!(
                "`{}` has {placeholders} placeholders but {} bound values",
                self.sql,
                self.args.len()
            )));
        }

        let mut parts = self.sql.split(PLACEHOLDER);
        if let Some(head) = parts.next() {
            qb.push(head);
        }
        for (arg, part) in self.args.iter().zip(parts) {
            match arg {
                Arg::Int(v) => qb.push_bind(*v),
                Arg::Float(v) => qb.push_bind(*v),
                Arg::Text(v) => qb.push_bind(v.clone()),
                Arg::IntList(v) => qb.push_bind(v.clone()),
            };
            qb.push(part);
        }
        Ok(())
    }
}

/// Optional predicates joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Fragment>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Fragment) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn and_some<T>(self, value: Option<T>, clause: impl FnOnce(T) -> Fragment) -> Self {
        match value {
            Some(value) => self.and(clause(value)),
            None => self,
        }
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'static, Postgres>) -> Result<(), sqlx::Error> {
        for (i, clause) in self.clauses.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            clause.push_to(qb)?;
        }
        Ok(())
    }
}

/// One entity's list query: select list, source, predicates, grouping,
/// ordering and page window.
#[derive(Debug, Clone)]
pub struct Select<'a> {
    pub columns: Fragment,
    pub from: Fragment,
    /// Source for the count query when `from` carries joins that only feed
    /// the select list.
    pub count_from: Option<Fragment>,
    pub filter: &'a Filter,
    pub group_by: Option<&'a str>,
    pub order_by: Vec<Fragment>,
    pub page: Page,
}

impl Select<'_> {
    /// Closest first by projected distance from `at`, then by id.
    pub fn ordered_by_distance(mut self, column: &str, id_column: &str, at: Location) -> Self {
        self.order_by = vec![
            geo::distance_to(column, at).append(" ASC"),
            Fragment::new(format!("{id_column} ASC")),
        ];
        self
    }

    pub fn build(&self) -> Result<QueryBuilder<'static, Postgres>, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT ");
        self.columns.push_to(&mut qb)?;
        qb.push(" FROM ");
        self.from.push_to(&mut qb)?;
        self.filter.push_where(&mut qb)?;

        if let Some(group_by) = self.group_by {
            qb.push(" GROUP BY ").push(group_by);
        }
        for (i, term) in self.order_by.iter().enumerate() {
            qb.push(if i == 0 { " ORDER BY " } else { ", " });
            term.push_to(&mut qb)?;
        }
        if let Some(limit) = self.page.limit() {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if self.page.offset > 0 {
            qb.push(" OFFSET ").push_bind(self.page.offset);
        }
        Ok(qb)
    }

    /// `COUNT` over the same predicates, without ordering or page window.
    /// `expr` is `*` or a `DISTINCT` key for joins that fan out.
    pub fn build_count(&self, expr: &str) -> Result<QueryBuilder<'static, Postgres>, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT COUNT(");
        qb.push(expr).push(") FROM ");
        self.count_from.as_ref().unwrap_or(&self.from).push_to(&mut qb)?;
        self.filter.push_where(&mut qb)?;
        Ok(qb)
    }

    /// Runs the page query, maps every row, and settles the total count,
    /// issuing `COUNT(count_expr)` only when the page cannot stand in for it.
    pub async fn fetch_page<T>(
        &self,
        pool: &PgPool,
        count_expr: &str,
        operation: &'static str,
        map: fn(&PgRow) -> Result<T, sqlx::Error>,
    ) -> QueryResult<Paginated<T>> {
        let rows = self
            .build()
            .context(operation)?
            .build()
            .fetch_all(pool)
            .await
            .context(operation)?;
        let items = rows
            .iter()
            .map(map)
            .collect::<Result<Vec<_>, _>>()
            .context(operation)?;

        let count = async {
            self.build_count(count_expr)
                .context(operation)?
                .build_query_scalar::<i64>()
                .fetch_one(pool)
                .await
                .context(operation)
        };
        let total_count = self.page.total_count(items.len(), count).await?;

        Ok(Paginated { items, total_count })
    }
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term
/// taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

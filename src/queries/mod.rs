pub mod builder;
pub mod category;
pub mod city;
pub mod exists;
pub mod geo;
pub mod mall;
pub mod mapper;
pub mod pagination;
pub mod search;
pub mod shop;
pub mod sort;

pub use pagination::{Page, Paginated};
pub use sort::{InvalidSortKey, Sorting};

/// A failed database round trip, tagged with the query that issued it.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {source}")]
pub struct QueryError {
    pub operation: &'static str,
    #[source]
    pub source: sqlx::Error,
}

pub type QueryResult<T> = Result<T, QueryError>;

pub trait QueryContext<T> {
    fn context(self, operation: &'static str) -> QueryResult<T>;
}

impl<T> QueryContext<T> for Result<T, sqlx::Error> {
    fn context(self, operation: &'static str) -> QueryResult<T> {
        self.map_err(|source| QueryError { operation, source })
    }
}

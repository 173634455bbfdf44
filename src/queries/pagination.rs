use std::future::Future;

use serde::{Deserialize, Serialize};

use super::QueryResult;

/// Limit/offset window. A limit of zero is the same as no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
        }
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// Total row count implied by the page alone, when no rows can have been
    /// cut off by the limit and the offset is known to lie inside the result.
    ///
    /// A full page may hide further rows, and an empty page past offset zero
    /// cannot tell "past the end" from "fewer rows than the offset". Both need
    /// a real count.
    pub fn derived_total(&self, returned: usize) -> Option<i64> {
        let returned = i64::try_from(returned).ok()?;
        let complete = match self.limit() {
            None => true,
            Some(limit) => returned < limit,
        };
        let anchored = self.offset == 0 || returned > 0;

        (complete && anchored).then(|| returned + self.offset)
    }

    /// Resolves the total, awaiting `count` only when the page cannot stand
    /// in for it.
    pub async fn total_count<F>(&self, returned: usize, count: F) -> QueryResult<i64>
    where
        F: Future<Output = QueryResult<i64>>,
    {
        match self.derived_total(returned) {
            Some(total) => Ok(total),
            None => {
                tracing::debug!(returned, offset = self.offset, limit = ?self.limit(), "running count query");
                count.await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

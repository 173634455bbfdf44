use serde::{Deserialize, Serialize};

use super::mall::Mall;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub mall: Mall,
    /// Requested shop ids that are present in `mall`.
    pub shop_ids: Vec<i64>,
    pub distance: Option<f64>,
}

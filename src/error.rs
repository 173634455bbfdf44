// src/error.rs
use axum::{response::{IntoResponse, Response}, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::queries::{InvalidSortKey, QueryError};

pub mod codes {
    pub const INVALID_PARAMETERS: &str = "INVALID_PARAMETERS";
    pub const INVALID_SORT_KEY: &str = "INVALID_SORT_KEY";
    pub const MALL_NOT_FOUND: &str = "MALL_NOT_FOUND";
    pub const SHOP_NOT_FOUND: &str = "SHOP_NOT_FOUND";
    pub const CITY_NOT_FOUND: &str = "CITY_NOT_FOUND";
    pub const CATEGORY_NOT_FOUND: &str = "CATEGORY_NOT_FOUND";
    pub const SUBWAY_STATION_NOT_FOUND: &str = "SUBWAY_STATION_NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[derive(Debug)]
pub enum AppError {
    Validation { code: &'static str, details: String },
    NotFound { code: &'static str, details: String },
    Database(QueryError),
    Internal(String),
}

impl AppError {
    pub fn validation(details: impl Into<String>) -> Self {
        AppError::Validation {
            code: codes::INVALID_PARAMETERS,
            details: details.into(),
        }
    }

    pub fn not_found(code: &'static str, details: impl Into<String>) -> Self {
        AppError::NotFound {
            code,
            details: details.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        AppError::Internal(details.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub details: String,
    pub status_code: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, details) = match self {
            AppError::Validation { code, details } | AppError::NotFound { code, details } => {
                (code, details)
            }
            AppError::Database(err) => {
                tracing::error!(operation = err.operation, error = %err.source, "Database query failed");
                (codes::INTERNAL_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (codes::INTERNAL_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorEnvelope {
            error: ErrorBody {
                code: code.to_string(),
                details,
                status_code: status.as_u16(),
            },
        });

        (status, body).into_response()
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Database(err)
    }
}

impl From<InvalidSortKey> for AppError {
    fn from(err: InvalidSortKey) -> Self {
        AppError::Validation {
            code: codes::INVALID_SORT_KEY,
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn envelope(err: AppError) -> (StatusCode, ErrorEnvelope) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_keeps_code_and_details() {
        let (status, body) =
            envelope(AppError::not_found(codes::SHOP_NOT_FOUND, "Shop 7 not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "SHOP_NOT_FOUND");
        assert_eq!(body.error.details, "Shop 7 not found");
        assert_eq!(body.error.status_code, 404);
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let err = QueryError {
            operation: "get_malls",
            source: sqlx::Error::RowNotFound,
        };
        let (status, body) = envelope(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.details.contains("get_malls"));
    }

    #[tokio::test]
    async fn invalid_sort_key_is_bad_request() {
        let err = InvalidSortKey {
            key: "price".to_string(),
            allowed: vec!["id", "name"],
        };
        let (status, body) = envelope(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "INVALID_SORT_KEY");
        assert!(body.error.details.contains("price"));
    }
}

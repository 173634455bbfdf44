use axum::extract::State;

use crate::database;
use crate::error::AppError;
use crate::state::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn db_health_check(
    State(AppState { db_pool }): State<AppState>,
) -> Result<&'static str, AppError> {
    database::ping(&db_pool)
        .await
        .map_err(|e| AppError::internal(format!("Database ping failed: {e}")))?;
    Ok("OK")
}

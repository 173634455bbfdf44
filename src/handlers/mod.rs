pub mod category;
pub mod city;
pub mod health;
pub mod mall;
pub mod search;
pub mod shop;

use sqlx::PgPool;

use crate::error::{codes, AppError};
use crate::queries::exists::{exists, Entity};

/// 404s with the entity's code when `id` has no row.
pub async fn ensure_exists(pool: &PgPool, entity: Entity, id: i64) -> Result<(), AppError> {
    if exists(pool, entity, id).await? {
        return Ok(());
    }

    let (code, label) = match entity {
        Entity::Shop => (codes::SHOP_NOT_FOUND, "Shop"),
        Entity::Mall => (codes::MALL_NOT_FOUND, "Mall"),
        Entity::City => (codes::CITY_NOT_FOUND, "City"),
        Entity::Category => (codes::CATEGORY_NOT_FOUND, "Category"),
        Entity::SubwayStation => (codes::SUBWAY_STATION_NOT_FOUND, "Subway station"),
    };
    Err(AppError::not_found(code, format!("{label} {id} not found")))
}

/// Checks every parent filter that was supplied, in order.
pub async fn ensure_all_exist(
    pool: &PgPool,
    parents: &[(Entity, Option<i64>)],
) -> Result<(), AppError> {
    for (entity, id) in parents {
        if let Some(id) = id {
            ensure_exists(pool, *entity, *id).await?;
        }
    }
    Ok(())
}

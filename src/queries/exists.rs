//! Cheap `EXISTS` checks used to answer 404 before running a list query.

use sqlx::PgPool;

use super::{QueryContext, QueryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Shop,
    Mall,
    City,
    Category,
    SubwayStation,
}

impl Entity {
    pub fn table(self) -> &'static str {
        match self {
            Entity::Shop => "shop",
            Entity::Mall => "mall",
            Entity::City => "city",
            Entity::Category => "category",
            Entity::SubwayStation => "subway_station",
        }
    }

    fn exists_sql(self) -> String {
        format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", self.table())
    }
}

pub async fn exists(pool: &PgPool, entity: Entity, id: i64) -> QueryResult<bool> {
    sqlx::query_scalar::<_, bool>(&entity.exists_sql())
        .bind(id)
        .fetch_one(pool)
        .await
        .context("exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_the_entity_table() {
        assert_eq!(
            Entity::SubwayStation.exists_sql(),
            "SELECT EXISTS(SELECT 1 FROM subway_station WHERE id = $1)"
        );
        assert_eq!(Entity::Shop.exists_sql(), "SELECT EXISTS(SELECT 1 FROM shop WHERE id = $1)");
    }
}

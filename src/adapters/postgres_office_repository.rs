//! Postgres implementation of OfficeSpaceRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{City, OfficeSpace};
use crate::ports::{OfficeSpaceRepository, RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct PostgresOfficeSpaceRepository {
    pool: PgPool,
}

impl PostgresOfficeSpaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficeSpaceRepository for PostgresOfficeSpaceRepository {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<OfficeSpace>> {
        let row = sqlx::query_as::<_, OfficeSpaceRow>(
            r#"
            SELECT o.id, o.name, o.slug, o.address, o.about, o.price, o.duration,
                c.id AS city_id, c.name AS city_name, c.slug AS city_slug
            FROM office_spaces o
            JOIN cities c ON c.id = o.city_id
            WHERE o.id = $1 AND o.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(|r| r.into_domain()))
    }

    async fn get_by_slug(&self, slug: &str) -> RepositoryResult<Option<OfficeSpace>> {
        let row = sqlx::query_as::<_, OfficeSpaceRow>(
            r#"
            SELECT o.id, o.name, o.slug, o.address, o.about, o.price, o.duration,
                c.id AS city_id, c.name AS city_name, c.slug AS city_slug
            FROM office_spaces o
            JOIN cities c ON c.id = o.city_id
            WHERE o.slug = $1 AND o.deleted_at IS NULL
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(|r| r.into_domain()))
    }

    async fn list(&self) -> RepositoryResult<Vec<OfficeSpace>> {
        let rows = sqlx::query_as::<_, OfficeSpaceRow>(
            r#"
            SELECT o.id, o.name, o.slug, o.address, o.about, o.price, o.duration,
                c.id AS city_id, c.name AS city_name, c.slug AS city_slug
            FROM office_spaces o
            JOIN cities c ON c.id = o.city_id
            WHERE o.deleted_at IS NULL
            ORDER BY o.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OfficeSpaceRow {
    id: i64,
    name: String,
    slug: String,
    address: String,
    about: String,
    price: i64,
    duration: i32,
    city_id: i64,
    city_name: String,
    city_slug: String,
}

impl OfficeSpaceRow {
    fn into_domain(self) -> OfficeSpace {
        OfficeSpace {
            id: self.id,
            name: self.name,
            slug: self.slug,
            address: self.address,
            about: self.about,
            price: self.price,
            duration: self.duration,
            city: City {
                id: self.city_id,
                name: self.city_name,
                slug: self.city_slug,
            },
        }
    }
}

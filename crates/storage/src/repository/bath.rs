use sqlx::{PgPool, QueryBuilder};

use crate::dto::bath::{BathFilter, CreateBathRequest};
use crate::error::{Result, StorageError};
use crate::models::{Bath, Country, Region};

const BATH_COLUMNS: &str = "id, name, aliases, country_id, region_id, city, lat, lng, \
     description, url, is_archived, canonical_id, created_at";

/// Repository for Bath database operations
pub struct BathRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BathRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Bath> {
        sqlx::query_as::<_, Bath>(&format!("SELECT {BATH_COLUMNS} FROM baths WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn list(&self, filter: &BathFilter) -> Result<Vec<Bath>> {
        let mut query = QueryBuilder::new(format!("SELECT {BATH_COLUMNS} FROM baths WHERE 1=1"));

        if !filter.include_archived {
            query.push(" AND is_archived = FALSE");
        }
        if let Some(ref q) = filter.q {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{q}%"));
        }

        query.push(" ORDER BY name LIMIT ");
        query.push_bind(filter.limit());
        query.push(" OFFSET ");
        query.push_bind(filter.offset());

        let baths = query.build_query_as().fetch_all(self.pool).await?;
        Ok(baths)
    }

    pub async fn create(&self, req: &CreateBathRequest) -> Result<Bath> {
        let bath = sqlx::query_as::<_, Bath>(&format!(
            r#"
            INSERT INTO baths (name, aliases, country_id, region_id, city, lat, lng,
                               description, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {BATH_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.aliases)
        .bind(req.country_id)
        .bind(req.region_id)
        .bind(&req.city)
        .bind(req.lat)
        .bind(req.lng)
        .bind(&req.description)
        .bind(&req.url)
        .fetch_one(self.pool)
        .await?;

        Ok(bath)
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        let countries =
            sqlx::query_as::<_, Country>("SELECT id, name, code FROM countries ORDER BY name")
                .fetch_all(self.pool)
                .await?;
        Ok(countries)
    }

    pub async fn regions(&self) -> Result<Vec<Region>> {
        let regions =
            sqlx::query_as::<_, Region>("SELECT id, country_id, name FROM regions ORDER BY name")
                .fetch_all(self.pool)
                .await?;
        Ok(regions)
    }
}

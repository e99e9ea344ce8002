use sqlx::PgPool;
use storage::{
    dto::bath::{BathFilter, CreateBathRequest},
    error::Result,
    models::{Bath, Country, Region},
    repository::bath::BathRepository,
};

pub async fn list_baths(pool: &PgPool, filter: &BathFilter) -> Result<Vec<Bath>> {
    let repo = BathRepository::new(pool);
    repo.list(filter).await
}

pub async fn get_bath(pool: &PgPool, bath_id: i32) -> Result<Bath> {
    let repo = BathRepository::new(pool);
    repo.find_by_id(bath_id).await
}

pub async fn create_bath(pool: &PgPool, req: &CreateBathRequest) -> Result<Bath> {
    let repo = BathRepository::new(pool);
    repo.create(req).await
}

pub async fn list_countries(pool: &PgPool) -> Result<Vec<Country>> {
    let repo = BathRepository::new(pool);
    repo.countries().await
}

pub async fn list_regions(pool: &PgPool) -> Result<Vec<Region>> {
    let repo = BathRepository::new(pool);
    repo.regions().await
}

use sqlx::PgPool;
use storage::{
    dto::settings::UpdateSettingsRequest, error::Result, models::ConfigEntry,
    repository::config::ConfigRepository,
};

pub async fn get_settings(pool: &PgPool) -> Result<Vec<ConfigEntry>> {
    let repo = ConfigRepository::new(pool);
    repo.merged().await
}

/// Upsert each present weight; returns the keys that changed.
pub async fn update_settings(pool: &PgPool, req: &UpdateSettingsRequest) -> Result<Vec<String>> {
    let repo = ConfigRepository::new(pool);

    let pairs = req.as_pairs();
    for (key, value) in &pairs {
        repo.upsert(key, *value).await?;
    }

    Ok(pairs.into_iter().map(|(key, _)| key.to_string()).collect())
}

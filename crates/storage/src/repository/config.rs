use sqlx::PgPool;

use crate::error::Result;
use crate::models::ConfigEntry;

/// Defaults used for any rule key the store does not carry.
pub const DEFAULT_CONFIG: [(&str, f64, &str); 5] = [
    ("base_points", 1.0, "Base points for any visit"),
    ("long_bonus", 1.0, "Bonus for a long visit (over 150 minutes)"),
    ("region_bonus", 1.0, "Bonus for a new region this season"),
    ("country_bonus", 1.0, "Bonus for a new country this season"),
    ("ultraunique_bonus", 1.0, "Bonus for an ultra-unique bath"),
];

/// Repository for the rule-weight config store
pub struct ConfigRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ConfigRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn entries(&self) -> Result<Vec<ConfigEntry>> {
        let entries =
            sqlx::query_as::<_, ConfigEntry>("SELECT key, value, description FROM point_config")
                .fetch_all(self.pool)
                .await?;
        Ok(entries)
    }

    /// Stored rows layered over the defaults, in default-key order.
    pub async fn merged(&self) -> Result<Vec<ConfigEntry>> {
        let stored = self.entries().await?;

        let merged = DEFAULT_CONFIG
            .iter()
            .map(|(key, value, description)| {
                stored
                    .iter()
                    .find(|e| e.key == *key)
                    .cloned()
                    .unwrap_or_else(|| ConfigEntry {
                        key: key.to_string(),
                        value: *value,
                        description: description.to_string(),
                    })
            })
            .collect();

        Ok(merged)
    }

    pub async fn upsert(&self, key: &str, value: f64) -> Result<()> {
        let description = DEFAULT_CONFIG
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, _, d)| *d)
            .unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO point_config (key, value, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

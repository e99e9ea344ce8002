use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Region {
    pub id: i32,
    pub country_id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bath {
    pub id: i32,
    pub name: String,
    pub aliases: Option<Vec<String>>,
    pub country_id: Option<i32>,
    pub region_id: Option<i32>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_archived: bool,
    /// Set when this bath has been merged into another; visits keep scoring
    /// by their own bath_id unless explicitly repointed.
    pub canonical_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

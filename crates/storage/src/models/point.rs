use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Which scoring rule produced an award. One award per rule that fired,
/// so a participant can hold several rows for the same visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AwardReason {
    Base,
    Long,
    Ultraunique,
    NewRegion,
    NewCountry,
}

impl AwardReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Long => "long",
            Self::Ultraunique => "ultraunique",
            Self::NewRegion => "new_region",
            Self::NewCountry => "new_country",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PointAward {
    pub id: i32,
    pub user_id: i64,
    pub visit_id: i32,
    pub points: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ConfigEntry {
    pub key: String,
    pub value: f64,
    pub description: String,
}

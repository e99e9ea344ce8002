use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Register or refresh a participant; ids come from the chat platform.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertUserRequest {
    pub id: i64,

    #[validate(length(max = 255))]
    pub username: Option<String>,

    #[validate(length(
        min = 1,
        max = 512,
        message = "Full name must be between 1 and 512 characters"
    ))]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserWithPoints {
    pub id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub points: f64,
}

/// Profile plus the aggregates the profile pages show.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub points: f64,
    pub visit_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

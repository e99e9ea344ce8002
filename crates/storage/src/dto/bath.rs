use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, IntoParams)]
pub struct BathFilter {
    /// Case-insensitive substring match on the name.
    pub q: Option<String>,
    #[serde(default)]
    pub include_archived: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl BathFilter {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit() < 1 || self.limit() > 200 {
            return Err("limit must be between 1 and 200".to_string());
        }
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

/// Request payload for registering a bath
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBathRequest {
    #[validate(length(
        min = 1,
        max = 512,
        message = "Name must be between 1 and 512 characters"
    ))]
    pub name: String,

    pub aliases: Option<Vec<String>>,

    pub country_id: Option<i32>,

    pub region_id: Option<i32>,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    pub lat: Option<f64>,

    pub lng: Option<f64>,

    #[validate(length(max = 2048))]
    pub description: Option<String>,

    #[validate(length(max = 512))]
    pub url: Option<String>,
}

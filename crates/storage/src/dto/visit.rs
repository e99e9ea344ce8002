use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::models::{Bath, PointAward, User, Visit, VisitStatus};

fn validate_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<VisitStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_status"))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VisitFilter {
    pub status: Option<String>,
    pub bath_id: Option<i32>,
    pub user_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl VisitFilter {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref status) = self.status
            && status.parse::<VisitStatus>().is_err()
        {
            return Err(format!("unknown status filter: {status}"));
        }
        if self.limit() < 1 || self.limit() > 200 {
            return Err("limit must be between 1 and 200".to_string());
        }
        if self.offset() < 0 {
            return Err("offset must be >= 0".to_string());
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

/// Request payload for reporting a visit
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVisitRequest {
    pub bath_id: Option<i32>,

    pub created_by: Option<i64>,

    /// Chat correlation ids, used only for ingestion dedup.
    pub message_id: Option<i64>,
    pub chat_id: Option<i64>,

    #[serde(default)]
    pub participant_ids: Vec<i64>,

    #[serde(default)]
    pub flag_long: bool,

    /// Defaults to the time of the report.
    pub visited_at: Option<DateTime<Utc>>,
}

/// Request payload for a partial visit update; every present field is applied
/// through the mutation orchestration and triggers a recompute.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVisitRequest {
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    pub flag_long: Option<bool>,

    pub bath_id: Option<i32>,

    pub participant_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BathSummary {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub country_id: Option<i32>,
    pub region_id: Option<i32>,
}

impl From<Bath> for BathSummary {
    fn from(bath: Bath) -> Self {
        Self {
            id: bath.id,
            name: bath.name,
            city: bath.city,
            country_id: bath.country_id,
            region_id: bath.region_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantInfo {
    pub id: i64,
    pub full_name: String,
    pub username: Option<String>,
}

impl From<User> for ParticipantInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardInfo {
    pub user_id: i64,
    pub points: f64,
    pub reason: String,
}

impl From<PointAward> for AwardInfo {
    fn from(award: PointAward) -> Self {
        Self {
            user_id: award.user_id,
            points: award.points,
            reason: award.reason,
        }
    }
}

/// Full visit detail as the admin UI and bot read it back.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitResponse {
    pub id: i32,
    pub status: String,
    pub visited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub flag_long: bool,
    pub flag_ultraunique: bool,
    pub bath: Option<BathSummary>,
    pub participants: Vec<ParticipantInfo>,
    pub awards: Vec<AwardInfo>,
    pub total_points: f64,
}

impl VisitResponse {
    pub fn assemble(
        visit: Visit,
        bath: Option<Bath>,
        participants: Vec<User>,
        awards: Vec<PointAward>,
    ) -> Self {
        let total_points = awards.iter().map(|a| a.points).sum();
        Self {
            id: visit.id,
            status: visit.status,
            visited_at: visit.visited_at,
            created_at: visit.created_at,
            updated_at: visit.updated_at,
            flag_long: visit.flag_long,
            flag_ultraunique: visit.flag_ultraunique,
            bath: bath.map(BathSummary::from),
            participants: participants.into_iter().map(ParticipantInfo::from).collect(),
            awards: awards.into_iter().map(AwardInfo::from).collect(),
            total_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> VisitFilter {
        VisitFilter {
            status: None,
            bath_id: None,
            user_id: None,
            date_from: None,
            date_to: None,
            limit: None,
            offset: None,
        }
    }

    #[test]
    fn default_filter_is_valid() {
        let f = filter();
        assert!(f.validate().is_ok());
        assert_eq!(f.limit(), 50);
        assert_eq!(f.offset(), 0);
    }

    #[test]
    fn oversized_limit_is_rejected() {
        let f = VisitFilter {
            limit: Some(500),
            ..filter()
        };
        assert!(f.validate().is_err());
    }

    #[test]
    fn bogus_status_filter_is_rejected() {
        let f = VisitFilter {
            status: Some("deleted".to_string()),
            ..filter()
        };
        assert!(f.validate().is_err());
    }
}

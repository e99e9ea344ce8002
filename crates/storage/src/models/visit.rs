use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Draft,
    Pending,
    Confirmed,
    Disputed,
    Cancelled,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Disputed => "disputed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses whose visits count toward points and "first time" history.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Draft | Self::Pending)
    }

    /// Terminal no-points statuses: recompute clears all awards.
    pub fn clears_awards(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Disputed)
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "disputed" => Ok(Self::Disputed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StorageError::Validation(format!(
                "unknown visit status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visit {
    pub id: i32,
    pub bath_id: Option<i32>,
    pub created_by: Option<i64>,
    pub message_id: Option<i64>,
    pub chat_id: Option<i64>,
    pub status: String,
    /// When the bathing event happened, as opposed to when it was reported.
    pub visited_at: DateTime<Utc>,
    pub flag_long: bool,
    /// Stored flag only; eligibility is recomputed live on every recalculation.
    pub flag_ultraunique: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visit {
    pub fn status(&self) -> Result<VisitStatus, StorageError> {
        self.status.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            VisitStatus::Draft,
            VisitStatus::Pending,
            VisitStatus::Confirmed,
            VisitStatus::Disputed,
            VisitStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<VisitStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "archived".parse::<VisitStatus>().unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn active_and_clearing_sets_are_disjoint_and_total() {
        assert!(VisitStatus::Confirmed.is_active());
        assert!(VisitStatus::Draft.is_active());
        assert!(VisitStatus::Pending.is_active());
        assert!(!VisitStatus::Cancelled.is_active());
        assert!(!VisitStatus::Disputed.is_active());

        assert!(VisitStatus::Cancelled.clears_awards());
        assert!(VisitStatus::Disputed.clears_awards());
        assert!(!VisitStatus::Confirmed.clears_awards());
    }
}

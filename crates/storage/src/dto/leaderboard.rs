use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    #[default]
    Year,
    All,
}

impl Period {
    /// Window start for the ranking, relative to `now`; `None` means all time.
    pub fn start_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start_day = match self {
            Self::Week => today.checked_sub_days(Days::new(today.weekday().num_days_from_monday() as u64))?,
            Self::Month => today.with_day(1)?,
            Self::Year => today.with_month(1)?.with_day(1)?,
            Self::All => return None,
        };
        Some(start_day.and_time(NaiveTime::MIN).and_utc())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: i64,
    pub full_name: String,
    pub username: Option<String>,
    pub points: f64,
    pub visit_count: i64,
    pub bath_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-08-06 is a Thursday.
        let start = Period::Week.start_from(at(2026, 8, 6, 15)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn monday_is_its_own_week_start() {
        let start = Period::Week.start_from(at(2026, 8, 3, 9)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_starts_on_the_first() {
        let start = Period::Month.start_from(at(2026, 8, 6, 15)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn year_starts_in_january() {
        let start = Period::Year.start_from(at(2026, 8, 6, 15)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn all_time_has_no_window() {
        assert!(Period::All.start_from(at(2026, 8, 6, 15)).is_none());
    }
}

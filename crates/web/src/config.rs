use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use storage::ScoringPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub season_year: i32,
    pub ultraunique_start_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            season_year: match std::env::var("SEASON_YEAR") {
                Ok(value) => value.parse().context("SEASON_YEAR must be a year")?,
                Err(_) => 2026,
            },
            ultraunique_start_date: match std::env::var("ULTRAUNIQUE_START_DATE") {
                Ok(value) => value
                    .parse()
                    .context("ULTRAUNIQUE_START_DATE must be YYYY-MM-DD")?,
                Err(_) => NaiveDate::from_ymd_opt(2023, 1, 1)
                    .context("invalid built-in cutoff date")?,
            },
        })
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy::new(
            self.season_year,
            self.ultraunique_start_date
                .and_time(NaiveTime::MIN)
                .and_utc(),
        )
    }
}

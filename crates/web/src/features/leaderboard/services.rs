use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::leaderboard::{LeaderboardEntry, Period},
    error::Result,
    repository::leaderboard::LeaderboardRepository,
};

pub async fn get_leaderboard(
    pool: &PgPool,
    period: Period,
    now: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>> {
    let repo = LeaderboardRepository::new(pool);
    repo.entries(period.start_from(now)).await
}

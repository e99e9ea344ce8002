use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::Result;

#[derive(FromRow)]
struct LeaderboardRow {
    user_id: i64,
    full_name: String,
    username: Option<String>,
    points: f64,
    visit_count: i64,
    bath_count: i64,
}

/// Ranked point totals over active users and active visits.
pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// `since` bounds the window by visit date; `None` ranks all time.
    pub async fn entries(&self, since: Option<DateTime<Utc>>) -> Result<Vec<LeaderboardEntry>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT u.id AS user_id,
                   u.full_name,
                   u.username,
                   COALESCE(SUM(pa.points), 0) AS points,
                   COUNT(DISTINCT v.id) AS visit_count,
                   COUNT(DISTINCT v.bath_id) AS bath_count
            FROM users u
            JOIN point_awards pa ON pa.user_id = u.id
            JOIN visits v ON v.id = pa.visit_id
            WHERE u.is_active = TRUE
              AND v.status IN ('confirmed', 'draft', 'pending')
            "#,
        );

        if let Some(since) = since {
            query.push(" AND v.visited_at >= ");
            query.push_bind(since);
        }

        query.push(
            r#"
            GROUP BY u.id, u.full_name, u.username
            ORDER BY points DESC, u.id
            "#,
        );

        let rows: Vec<LeaderboardRow> = query.build_query_as().fetch_all(self.pool).await?;

        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| LeaderboardEntry {
                rank: i as i64 + 1,
                user_id: row.user_id,
                full_name: row.full_name,
                username: row.username,
                points: row.points,
                visit_count: row.visit_count,
                bath_count: row.bath_count,
            })
            .collect();

        Ok(entries)
    }
}

//! The engine's named lookups. Every query runs on the recompute's own
//! transaction connection so the whole delete-evaluate-insert cycle commits
//! or rolls back as one unit.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, QueryBuilder};

use super::eligibility::VisitTimes;
use super::rules::NewAward;
use crate::models::{Bath, ConfigEntry, Visit};

const ACTIVE_STATUSES: &str = "('confirmed', 'draft', 'pending')";

pub async fn load_visit(conn: &mut PgConnection, visit_id: i32) -> sqlx::Result<Option<Visit>> {
    sqlx::query_as::<_, Visit>(
        r#"
        SELECT id, bath_id, created_by, message_id, chat_id, status,
               visited_at, flag_long, flag_ultraunique, created_at, updated_at
        FROM visits
        WHERE id = $1
        "#,
    )
    .bind(visit_id)
    .fetch_optional(conn)
    .await
}

pub async fn participant_ids(conn: &mut PgConnection, visit_id: i32) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM visit_participants WHERE visit_id = $1 ORDER BY user_id",
    )
    .bind(visit_id)
    .fetch_all(conn)
    .await
}

pub async fn delete_awards(conn: &mut PgConnection, visit_id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM point_awards WHERE visit_id = $1")
        .bind(visit_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn config_entries(conn: &mut PgConnection) -> sqlx::Result<Vec<ConfigEntry>> {
    sqlx::query_as::<_, ConfigEntry>("SELECT key, value, description FROM point_config")
        .fetch_all(conn)
        .await
}

pub async fn load_bath(conn: &mut PgConnection, bath_id: i32) -> sqlx::Result<Option<Bath>> {
    sqlx::query_as::<_, Bath>(
        r#"
        SELECT id, name, aliases, country_id, region_id, city, lat, lng,
               description, url, is_archived, canonical_id, created_at
        FROM baths
        WHERE id = $1
        "#,
    )
    .bind(bath_id)
    .fetch_optional(conn)
    .await
}

#[derive(FromRow)]
struct RivalRow {
    visited_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Other active visits to the same bath, the candidates that can deny
/// ultra-unique eligibility.
pub async fn rival_visits(
    conn: &mut PgConnection,
    bath_id: i32,
    exclude_visit: i32,
) -> sqlx::Result<Vec<VisitTimes>> {
    let rows = sqlx::query_as::<_, RivalRow>(&format!(
        r#"
        SELECT visited_at, created_at
        FROM visits
        WHERE bath_id = $1
          AND id <> $2
          AND status IN {ACTIVE_STATUSES}
        "#
    ))
    .bind(bath_id)
    .bind(exclude_visit)
    .fetch_all(conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| VisitTimes {
            visited_at: r.visited_at,
            created_at: r.created_at,
        })
        .collect())
}

/// Active visits by the user to a bath in the given region during the season
/// year, excluding the visit being recomputed.
pub async fn prior_region_visits(
    conn: &mut PgConnection,
    user_id: i64,
    region_id: i32,
    exclude_visit: i32,
    season_year: i32,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(v.id)
        FROM visits v
        JOIN visit_participants vp ON vp.visit_id = v.id
        JOIN baths b ON b.id = v.bath_id
        WHERE vp.user_id = $1
          AND b.region_id = $2
          AND v.id <> $3
          AND v.status IN {ACTIVE_STATUSES}
          AND EXTRACT(YEAR FROM v.visited_at)::int = $4
        "#
    ))
    .bind(user_id)
    .bind(region_id)
    .bind(exclude_visit)
    .bind(season_year)
    .fetch_one(conn)
    .await
}

pub async fn prior_country_visits(
    conn: &mut PgConnection,
    user_id: i64,
    country_id: i32,
    exclude_visit: i32,
    season_year: i32,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(v.id)
        FROM visits v
        JOIN visit_participants vp ON vp.visit_id = v.id
        JOIN baths b ON b.id = v.bath_id
        WHERE vp.user_id = $1
          AND b.country_id = $2
          AND v.id <> $3
          AND v.status IN {ACTIVE_STATUSES}
          AND EXTRACT(YEAR FROM v.visited_at)::int = $4
        "#
    ))
    .bind(user_id)
    .bind(country_id)
    .bind(exclude_visit)
    .bind(season_year)
    .fetch_one(conn)
    .await
}

/// One batch insert for the visit's whole new award set.
pub async fn insert_awards(
    conn: &mut PgConnection,
    visit_id: i32,
    awards: &[NewAward],
) -> sqlx::Result<()> {
    if awards.is_empty() {
        return Ok(());
    }

    let mut query =
        QueryBuilder::new("INSERT INTO point_awards (user_id, visit_id, points, reason) ");
    query.push_values(awards, |mut row, award| {
        row.push_bind(award.user_id)
            .push_bind(visit_id)
            .push_bind(award.points)
            .push_bind(award.reason.as_str());
    });
    query.build().execute(conn).await?;

    Ok(())
}

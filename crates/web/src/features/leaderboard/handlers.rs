use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use storage::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked point totals for the period", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, WebError> {
    let entries = services::get_leaderboard(state.db.pool(), query.period, Utc::now()).await?;
    Ok(Json(entries))
}

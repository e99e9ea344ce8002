use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use storage::{
    dto::user::{UpdateUserRequest, UpsertUserRequest, UserSummary, UserWithPoints},
    models::User,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::RequireApiKey;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users with point totals", body = Vec<UserWithPoints>),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    _auth: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithPoints>>, WebError> {
    let users = services::list_users(state.db.pool()).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "User registered or refreshed", body = User),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn upsert_user(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<(StatusCode, Json<User>), WebError> {
    req.validate()?;

    let user = services::upsert_user(
        state.db.pool(),
        req.id,
        req.username.as_deref(),
        &req.full_name,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile with aggregates", body = UserSummary),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserSummary>, WebError> {
    let summary = services::get_user_summary(state.db.pool(), id).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User flags updated", body = User),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, WebError> {
    let user = services::update_user(state.db.pool(), id, req.is_admin, req.is_active).await?;
    Ok(Json(user))
}

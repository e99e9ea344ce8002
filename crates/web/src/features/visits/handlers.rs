use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use storage::{
    dto::visit::{CreateVisitRequest, UpdateVisitRequest, VisitFilter, VisitResponse},
    models::VisitStatus,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::RequireApiKey;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/visits",
    params(VisitFilter),
    responses(
        (status = 200, description = "List visits, newest first", body = Vec<VisitResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "visits"
)]
pub async fn list_visits(
    State(state): State<AppState>,
    Query(filter): Query<VisitFilter>,
) -> Result<Json<Vec<VisitResponse>>, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let visits = services::list_visits(state.db.pool(), &filter).await?;
    Ok(Json(visits))
}

#[utoipa::path(
    get,
    path = "/api/visits/{id}",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit found", body = VisitResponse),
        (status = 404, description = "Visit not found")
    ),
    tag = "visits"
)]
pub async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VisitResponse>, WebError> {
    let visit = services::get_visit(state.db.pool(), id).await?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/api/visits",
    request_body = CreateVisitRequest,
    responses(
        (status = 201, description = "Visit reported and scored", body = VisitResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn create_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<CreateVisitRequest>,
) -> Result<(StatusCode, Json<VisitResponse>), WebError> {
    req.validate()?;

    let visit = services::create_visit(state.db.pool(), &state.policy, &req).await?;
    Ok((StatusCode::CREATED, Json(visit)))
}

#[utoipa::path(
    put,
    path = "/api/visits/{id}",
    params(("id" = i32, Path, description = "Visit id")),
    request_body = UpdateVisitRequest,
    responses(
        (status = 200, description = "Visit updated and rescored", body = VisitResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Visit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn update_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateVisitRequest>,
) -> Result<Json<VisitResponse>, WebError> {
    req.validate()?;

    let visit = services::update_visit(state.db.pool(), &state.policy, id, &req).await?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/api/visits/{id}/approve",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit confirmed", body = VisitResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Visit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn approve_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VisitResponse>, WebError> {
    let visit =
        services::set_status(state.db.pool(), &state.policy, id, VisitStatus::Confirmed).await?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/api/visits/{id}/cancel",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit cancelled, awards cleared", body = VisitResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Visit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn cancel_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VisitResponse>, WebError> {
    let visit =
        services::set_status(state.db.pool(), &state.policy, id, VisitStatus::Cancelled).await?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/api/visits/{id}/dispute",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit disputed, awards cleared", body = VisitResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Visit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn dispute_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VisitResponse>, WebError> {
    let visit =
        services::set_status(state.db.pool(), &state.policy, id, VisitStatus::Disputed).await?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/api/visits/{id}/recalculate",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 204, description = "Awards recomputed"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Visit not found"),
        (status = 500, description = "Recalculation failed; prior awards kept")
    ),
    security(("bearer_auth" = [])),
    tag = "visits"
)]
pub async fn recalculate_visit(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WebError> {
    services::recalculate(state.db.pool(), &state.policy, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

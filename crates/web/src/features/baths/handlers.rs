use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use storage::{
    dto::bath::{BathFilter, CreateBathRequest},
    models::{Bath, Country, Region},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::RequireApiKey;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/baths",
    params(BathFilter),
    responses(
        (status = 200, description = "List baths by name", body = Vec<Bath>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "baths"
)]
pub async fn list_baths(
    State(state): State<AppState>,
    Query(filter): Query<BathFilter>,
) -> Result<Json<Vec<Bath>>, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let baths = services::list_baths(state.db.pool(), &filter).await?;
    Ok(Json(baths))
}

#[utoipa::path(
    get,
    path = "/api/baths/countries",
    responses(
        (status = 200, description = "All countries", body = Vec<Country>)
    ),
    tag = "baths"
)]
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Country>>, WebError> {
    let countries = services::list_countries(state.db.pool()).await?;
    Ok(Json(countries))
}

#[utoipa::path(
    get,
    path = "/api/baths/regions",
    responses(
        (status = 200, description = "All regions", body = Vec<Region>)
    ),
    tag = "baths"
)]
pub async fn list_regions(State(state): State<AppState>) -> Result<Json<Vec<Region>>, WebError> {
    let regions = services::list_regions(state.db.pool()).await?;
    Ok(Json(regions))
}

#[utoipa::path(
    get,
    path = "/api/baths/{id}",
    params(("id" = i32, Path, description = "Bath id")),
    responses(
        (status = 200, description = "Bath found", body = Bath),
        (status = 404, description = "Bath not found")
    ),
    tag = "baths"
)]
pub async fn get_bath(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Bath>, WebError> {
    let bath = services::get_bath(state.db.pool(), id).await?;
    Ok(Json(bath))
}

#[utoipa::path(
    post,
    path = "/api/baths",
    request_body = CreateBathRequest,
    responses(
        (status = 201, description = "Bath registered", body = Bath),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "baths"
)]
pub async fn create_bath(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<CreateBathRequest>,
) -> Result<(StatusCode, Json<Bath>), WebError> {
    req.validate()?;

    let bath = services::create_bath(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(bath)))
}

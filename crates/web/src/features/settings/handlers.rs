use axum::{Json, extract::State};
use storage::{
    dto::settings::{UpdateSettingsRequest, UpdateSettingsResponse},
    models::ConfigEntry,
};

use crate::error::WebError;
use crate::middleware::auth::RequireApiKey;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Rule weights, stored rows over defaults", body = Vec<ConfigEntry>),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn get_settings(
    _auth: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfigEntry>>, WebError> {
    let entries = services::get_settings(state.db.pool()).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Weights upserted; applies to future recomputes", body = UpdateSettingsResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn update_settings(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<UpdateSettingsResponse>, WebError> {
    let updated = services::update_settings(state.db.pool(), &req).await?;
    Ok(Json(UpdateSettingsResponse { updated }))
}

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

use super::handlers::{get_settings, update_settings};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

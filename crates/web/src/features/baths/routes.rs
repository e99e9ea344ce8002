use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

use super::handlers::{create_bath, get_bath, list_baths, list_countries, list_regions};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_baths).post(create_bath))
        .route("/countries", get(list_countries))
        .route("/regions", get(list_regions))
        .route("/:id", get(get_bath))
}

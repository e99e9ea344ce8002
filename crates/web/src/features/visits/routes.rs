use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{
    approve_visit, cancel_visit, create_visit, dispute_visit, get_visit, list_visits,
    recalculate_visit, update_visit,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_visits).post(create_visit))
        .route("/:id", get(get_visit).put(update_visit))
        .route("/:id/approve", post(approve_visit))
        .route("/:id/cancel", post(cancel_visit))
        .route("/:id/dispute", post(dispute_visit))
        .route("/:id/recalculate", post(recalculate_visit))
}

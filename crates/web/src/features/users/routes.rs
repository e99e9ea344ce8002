use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

use super::handlers::{get_user, list_users, update_user, upsert_user};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(upsert_user))
        .route("/:id", get(get_user).put(update_user))
}

//! Route definitions for the mission registry and nested targets.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::mission;
use crate::state::AppState;

/// Routes for `/missions`, merged into the `/api` tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/missions/", get(mission::list).post(mission::create))
        .route(
            "/missions/{id}/",
            get(mission::get_by_id).delete(mission::delete),
        )
        .route(
            "/missions/{id}/assign-cat/{cat_id}/",
            patch(mission::assign_cat),
        )
        .route("/missions/{id}/remove-cat/", patch(mission::remove_cat))
        .route(
            "/missions/{id}/target/{target_id}/complete/",
            patch(mission::complete_target),
        )
        .route(
            "/missions/{id}/target/{target_id}/notes/",
            patch(mission::update_target_notes),
        )
}

//! Route definitions for the spy cat registry.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::spy_cat;
use crate::state::AppState;

/// Routes for `/spy_cats`, merged into the `/api` tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/spy_cats/", get(spy_cat::list).post(spy_cat::create))
        .route(
            "/spy_cats/{id}/",
            get(spy_cat::get_by_id)
                .put(spy_cat::update)
                .delete(spy_cat::delete),
        )
        .route("/spy_cats/{id}/salary", patch(spy_cat::update_salary))
}

pub mod health;
pub mod mission;
pub mod spy_cat;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (trailing slashes are significant):
///
/// ```text
/// /spy_cats/                                       list, create
/// /spy_cats/{id}/                                  get, replace, delete
/// /spy_cats/{id}/salary                            update salary (PATCH)
///
/// /missions/                                       list, create with targets
/// /missions/{id}/                                  get, delete
/// /missions/{id}/assign-cat/{cat_id}/              assign cat (PATCH)
/// /missions/{id}/remove-cat/                       remove cat (PATCH)
/// /missions/{id}/target/{target_id}/complete/      complete target (PATCH)
/// /missions/{id}/target/{target_id}/notes/         update notes (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(spy_cat::router())
        .merge(mission::router())
}

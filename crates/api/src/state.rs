use std::sync::Arc;

use spycats_core::breed::BreedCatalog;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: spycats_db::DbPool,
    /// Source of valid breed names, consulted on every cat create/update.
    pub breed_catalog: Arc<dyn BreedCatalog>,
}

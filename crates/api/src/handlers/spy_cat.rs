//! Handlers for the `/spy_cats` resource.

use axum::extract::{Path, State};
use axum::Json;
use spycats_core::breed::check_breed;
use spycats_core::error::CoreError;
use spycats_core::types::DbId;
use spycats_db::models::spy_cat::{CreateSpyCat, SpyCat, UpdateSalary};
use spycats_db::repositories::SpyCatRepo;
use validator::Validate;

use crate::error::{field_errors, AppError, AppResult, FieldError};
use crate::extract::{JsonBody, ValidatedJson, ValidatedQuery};
use crate::query::PageParams;
use crate::response::{DeleteResponse, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cat_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Spy cat",
        id,
    })
}

/// Run the `validator` rules and the breed lookup, reporting every failing
/// field together. A catalog outage is a 400, not a field error.
async fn validate_cat(state: &AppState, input: &CreateSpyCat) -> AppResult<()> {
    let mut fields = match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_errors(&errors),
    };

    let known = check_breed(state.breed_catalog.as_ref(), &input.breed)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, breed = %input.breed, "Breed catalog lookup failed");
            AppError::BadRequest("Unable to validate breed: breed catalog unavailable".into())
        })?;
    if !known {
        fields.push(FieldError::new(
            "breed",
            format!("{} is not a valid breed", input.breed),
        ));
    }

    AppError::validation(fields)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/spy_cats/
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateSpyCat>,
) -> AppResult<Json<SpyCat>> {
    validate_cat(&state, &input).await?;
    let cat = SpyCatRepo::create(&state.pool, &input).await?;
    tracing::info!(id = cat.id, name = %cat.name, "Spy cat registered");
    Ok(Json(cat))
}

/// GET /api/spy_cats/?page=N
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<Page<SpyCat>>> {
    let window = params.window()?;
    let items = SpyCatRepo::list(&state.pool, window.limit, window.offset).await?;
    let count = SpyCatRepo::count(&state.pool).await?;
    tracing::debug!(count = items.len(), total = count, "Listed spy cats");
    Ok(Json(Page { items, count }))
}

/// GET /api/spy_cats/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SpyCat>> {
    let cat = SpyCatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| cat_not_found(id))?;
    Ok(Json(cat))
}

/// PUT /api/spy_cats/{id}/
///
/// Full replacement: every field is re-validated, the breed included.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<CreateSpyCat>,
) -> AppResult<Json<SpyCat>> {
    validate_cat(&state, &input).await?;
    let cat = SpyCatRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| cat_not_found(id))?;
    tracing::info!(id, "Spy cat updated");
    Ok(Json(cat))
}

/// PATCH /api/spy_cats/{id}/salary
pub async fn update_salary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSalary>,
) -> AppResult<Json<SpyCat>> {
    let cat = SpyCatRepo::update_salary(&state.pool, id, input.salary)
        .await?
        .ok_or_else(|| cat_not_found(id))?;
    tracing::info!(id, salary = cat.salary, "Spy cat salary updated");
    Ok(Json(cat))
}

/// DELETE /api/spy_cats/{id}/
///
/// Missions the cat was assigned to survive with no cat assigned.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    if !SpyCatRepo::delete(&state.pool, id).await? {
        return Err(cat_not_found(id));
    }
    tracing::info!(id, "Spy cat deleted");
    Ok(Json(DeleteResponse::ok()))
}

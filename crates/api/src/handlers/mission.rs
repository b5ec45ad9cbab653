//! Handlers for the `/missions` resource and its nested targets.
//!
//! Targets are addressed through their mission:
//! `/missions/{id}/target/{target_id}/...`

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use spycats_core::error::CoreError;
use spycats_core::mission::{
    ensure_cat_assigned, ensure_cat_change_allowed, ensure_mission_deletable,
    ensure_target_editable, target_frozen, CatChange,
};
use spycats_core::types::DbId;
use spycats_db::models::mission::{CreateMission, Mission, MissionDetail};
use spycats_db::models::spy_cat::SpyCat;
use spycats_db::models::target::{Target, UpdateTargetNotes};
use spycats_db::repositories::{MissionRepo, SpyCatRepo, TargetRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::query::PageParams;
use crate::response::{DeleteResponse, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

async fn ensure_mission_exists(pool: &PgPool, id: DbId) -> AppResult<Mission> {
    MissionRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found("Mission", id))
}

async fn ensure_cat_exists(pool: &PgPool, id: DbId) -> AppResult<SpyCat> {
    SpyCatRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found("Spy cat", id))
}

/// Load a target and check it belongs to `mission_id`.
///
/// A target of another mission is reported as not found.
async fn ensure_target_in_mission(
    pool: &PgPool,
    mission_id: DbId,
    target_id: DbId,
) -> AppResult<Target> {
    TargetRepo::find_by_id(pool, target_id)
        .await?
        .filter(|target| target.mission_id == mission_id)
        .ok_or_else(|| not_found("Target", target_id))
}

/// Resolve the assigned cat and targets of a single mission.
async fn load_detail(pool: &PgPool, mission: Mission) -> AppResult<MissionDetail> {
    let cat = match mission.assigned_cat_id {
        Some(cat_id) => SpyCatRepo::find_by_id(pool, cat_id).await?,
        None => None,
    };
    let targets = TargetRepo::list_by_mission(pool, mission.id).await?;
    Ok(MissionDetail::assemble(mission, cat, targets))
}

/// Resolve cats and targets for a page of missions with one query each.
async fn load_details(pool: &PgPool, missions: Vec<Mission>) -> AppResult<Vec<MissionDetail>> {
    let mission_ids: Vec<DbId> = missions.iter().map(|m| m.id).collect();
    let mut cat_ids: Vec<DbId> = missions.iter().filter_map(|m| m.assigned_cat_id).collect();
    cat_ids.sort_unstable();
    cat_ids.dedup();

    let cats: HashMap<DbId, SpyCat> = SpyCatRepo::find_by_ids(pool, &cat_ids)
        .await?
        .into_iter()
        .map(|cat| (cat.id, cat))
        .collect();

    let mut targets_by_mission: HashMap<DbId, Vec<Target>> = HashMap::new();
    for target in TargetRepo::list_by_missions(pool, &mission_ids).await? {
        targets_by_mission
            .entry(target.mission_id)
            .or_default()
            .push(target);
    }

    Ok(missions
        .into_iter()
        .map(|mission| {
            let cat = mission
                .assigned_cat_id
                .and_then(|cat_id| cats.get(&cat_id).cloned());
            let targets = targets_by_mission.remove(&mission.id).unwrap_or_default();
            MissionDetail::assemble(mission, cat, targets)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

/// POST /api/missions/
///
/// Creates the mission and all of its targets atomically. An unknown
/// `assigned_cat` id fails before anything is written.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMission>,
) -> AppResult<Json<MissionDetail>> {
    let cat = match input.assigned_cat {
        Some(cat_id) => Some(ensure_cat_exists(&state.pool, cat_id).await?),
        None => None,
    };

    let (mission, targets) = MissionRepo::create_with_targets(&state.pool, &input).await?;
    tracing::info!(
        id = mission.id,
        name = %mission.name,
        targets = targets.len(),
        assigned_cat_id = ?mission.assigned_cat_id,
        "Mission created"
    );
    Ok(Json(MissionDetail::assemble(mission, cat, targets)))
}

/// GET /api/missions/?page=N
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<Page<MissionDetail>>> {
    let window = params.window()?;
    let missions = MissionRepo::list(&state.pool, window.limit, window.offset).await?;
    let count = MissionRepo::count(&state.pool).await?;
    let items = load_details(&state.pool, missions).await?;
    tracing::debug!(count = items.len(), total = count, "Listed missions");
    Ok(Json(Page { items, count }))
}

/// GET /api/missions/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MissionDetail>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    Ok(Json(load_detail(&state.pool, mission).await?))
}

/// PATCH /api/missions/{id}/assign-cat/{cat_id}/
pub async fn assign_cat(
    State(state): State<AppState>,
    Path((id, cat_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MissionDetail>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    ensure_cat_change_allowed(mission.is_completed, CatChange::Assign)?;
    ensure_cat_exists(&state.pool, cat_id).await?;

    let mission = MissionRepo::set_assigned_cat(&state.pool, id, Some(cat_id))
        .await?
        .ok_or_else(|| not_found("Mission", id))?;
    tracing::info!(id, cat_id, "Cat assigned to mission");
    Ok(Json(load_detail(&state.pool, mission).await?))
}

/// PATCH /api/missions/{id}/remove-cat/
pub async fn remove_cat(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MissionDetail>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    ensure_cat_change_allowed(mission.is_completed, CatChange::Remove)?;

    let mission = MissionRepo::set_assigned_cat(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found("Mission", id))?;
    tracing::info!(id, "Cat removed from mission");
    Ok(Json(load_detail(&state.pool, mission).await?))
}

/// DELETE /api/missions/{id}/
///
/// Refused while a cat is assigned. Targets go with the mission.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    ensure_mission_deletable(mission.assigned_cat_id)?;

    if !MissionRepo::delete(&state.pool, id).await? {
        return Err(not_found("Mission", id));
    }
    tracing::info!(id, "Mission deleted");
    Ok(Json(DeleteResponse::ok()))
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// PATCH /api/missions/{id}/target/{target_id}/complete/
///
/// Marks the target completed; completing the last open target also
/// completes the mission.
pub async fn complete_target(
    State(state): State<AppState>,
    Path((id, target_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Target>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    ensure_target_in_mission(&state.pool, id, target_id).await?;
    ensure_cat_assigned(mission.assigned_cat_id)?;

    let completion = TargetRepo::complete(&state.pool, target_id)
        .await?
        .ok_or_else(|| not_found("Target", target_id))?;
    tracing::info!(
        mission_id = id,
        target_id,
        mission_completed = completion.mission_completed,
        "Target completed"
    );
    Ok(Json(completion.target))
}

/// PATCH /api/missions/{id}/target/{target_id}/notes/?new_notes=...
pub async fn update_target_notes(
    State(state): State<AppState>,
    Path((id, target_id)): Path<(DbId, DbId)>,
    ValidatedQuery(input): ValidatedQuery<UpdateTargetNotes>,
) -> AppResult<Json<Target>> {
    let mission = ensure_mission_exists(&state.pool, id).await?;
    let target = ensure_target_in_mission(&state.pool, id, target_id).await?;
    ensure_cat_assigned(mission.assigned_cat_id)?;
    ensure_target_editable(target.is_completed, mission.is_completed)?;

    // The write re-checks the freeze rules; a miss here means the target or
    // mission changed since it was read.
    let target = TargetRepo::update_notes(&state.pool, target_id, &input.new_notes)
        .await?
        .ok_or_else(|| AppError::Core(target_frozen()))?;
    tracing::info!(mission_id = id, target_id, "Target notes updated");
    Ok(Json(target))
}

//! Repository for the `targets` table.

use spycats_core::mission::all_targets_completed;
use spycats_core::types::DbId;
use sqlx::PgPool;

use crate::models::target::Target;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, mission_id, name, country, notes, is_completed, created_at, updated_at";

/// Outcome of completing a target.
#[derive(Debug, Clone)]
pub struct TargetCompletion {
    pub target: Target,
    /// Whether every target of the mission is now completed, which also
    /// marks the mission completed.
    pub mission_completed: bool,
}

/// Provides read and update operations for targets. Targets are only
/// inserted by [`crate::repositories::MissionRepo::create_with_targets`]
/// and only deleted through the mission cascade.
pub struct TargetRepo;

impl TargetRepo {
    /// Find a target by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Target>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE id = $1");
        sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the targets of one mission in creation order.
    pub async fn list_by_mission(
        pool: &PgPool,
        mission_id: DbId,
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE mission_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Target>(&query)
            .bind(mission_id)
            .fetch_all(pool)
            .await
    }

    /// List the targets of several missions at once, ordered by mission then id.
    pub async fn list_by_missions(
        pool: &PgPool,
        mission_ids: &[DbId],
    ) -> Result<Vec<Target>, sqlx::Error> {
        if mission_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM targets
             WHERE mission_id = ANY($1)
             ORDER BY mission_id ASC, id ASC"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(mission_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a target's notes.
    ///
    /// Only an open target of an open mission with an assigned cat is
    /// written. Returns `None` if the target does not exist or is frozen.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: &str,
    ) -> Result<Option<Target>, sqlx::Error> {
        let query = format!(
            "UPDATE targets SET notes = $2, updated_at = NOW()
             WHERE id = $1
               AND is_completed = FALSE
               AND EXISTS (
                   SELECT 1 FROM missions m
                   WHERE m.id = targets.mission_id
                     AND m.is_completed = FALSE
                     AND m.assigned_cat_id IS NOT NULL
               )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Mark a target completed, then re-evaluate its mission.
    ///
    /// Runs in one transaction holding the mission row lock, so concurrent
    /// completions within a mission see each other's writes. The mission
    /// roll-up is recomputed on every call, so completing an already
    /// completed target still re-checks the siblings. Returns `None` if the
    /// target does not exist.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TargetCompletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM missions
             WHERE id = (SELECT mission_id FROM targets WHERE id = $1)
             FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "UPDATE targets SET is_completed = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(target) = sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let states: Vec<bool> =
            sqlx::query_scalar("SELECT is_completed FROM targets WHERE mission_id = $1")
                .bind(target.mission_id)
                .fetch_all(&mut *tx)
                .await?;

        let mission_completed = all_targets_completed(states);
        if mission_completed {
            sqlx::query(
                "UPDATE missions SET is_completed = TRUE, updated_at = NOW() WHERE id = $1",
            )
            .bind(target.mission_id)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(mission_id = target.mission_id, "All targets completed, mission closed");
        }

        tx.commit().await?;
        Ok(Some(TargetCompletion {
            target,
            mission_completed,
        }))
    }
}

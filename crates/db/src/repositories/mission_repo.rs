//! Repository for the `missions` table.

use spycats_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::{CreateMission, Mission};
use crate::models::target::Target;
use crate::repositories::target_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, assigned_cat_id, is_completed, created_at, updated_at";

/// Provides CRUD operations for missions.
pub struct MissionRepo;

impl MissionRepo {
    /// Insert a mission and all of its targets in one transaction.
    ///
    /// `input.assigned_cat` must reference an existing cat; a dangling id
    /// fails the foreign key and nothing is written.
    pub async fn create_with_targets(
        pool: &PgPool,
        input: &CreateMission,
    ) -> Result<(Mission, Vec<Target>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO missions (name, description, assigned_cat_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let mission = sqlx::query_as::<_, Mission>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.assigned_cat)
            .fetch_one(&mut *tx)
            .await?;

        let target_query = format!(
            "INSERT INTO targets (mission_id, name, country, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            target_repo::COLUMNS
        );
        let mut targets = Vec::with_capacity(input.targets.len());
        for target in &input.targets {
            let created = sqlx::query_as::<_, Target>(&target_query)
                .bind(mission.id)
                .bind(&target.name)
                .bind(&target.country)
                .bind(&target.notes)
                .fetch_one(&mut *tx)
                .await?;
            targets.push(created);
        }

        tx.commit().await?;
        Ok((mission, targets))
    }

    /// Find a mission by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of missions, ordered by id ascending.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Mission>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of missions.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM missions")
            .fetch_one(pool)
            .await
    }

    /// Set or clear the assigned cat. Returns `None` if the mission does not exist.
    pub async fn set_assigned_cat(
        pool: &PgPool,
        id: DbId,
        cat_id: Option<DbId>,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET assigned_cat_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .bind(cat_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a mission and, through the cascade, its targets.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

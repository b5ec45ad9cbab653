//! Repository for the `spy_cats` table.

use spycats_core::types::DbId;
use sqlx::PgPool;

use crate::models::spy_cat::{CreateSpyCat, SpyCat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, years_of_experience, breed, salary, created_at, updated_at";

/// Provides CRUD operations for spy cats.
pub struct SpyCatRepo;

impl SpyCatRepo {
    /// Insert a new cat, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSpyCat) -> Result<SpyCat, sqlx::Error> {
        let query = format!(
            "INSERT INTO spy_cats (name, years_of_experience, breed, salary)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(&input.name)
            .bind(input.years_of_experience)
            .bind(&input.breed)
            .bind(input.salary)
            .fetch_one(pool)
            .await
    }

    /// Find a cat by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spy_cats WHERE id = $1");
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every cat whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<SpyCat>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM spy_cats WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List one page of cats, ordered by id ascending.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<SpyCat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spy_cats ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of cats.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM spy_cats")
            .fetch_one(pool)
            .await
    }

    /// Overwrite every editable field of a cat.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateSpyCat,
    ) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!(
            "UPDATE spy_cats SET
                name = $2,
                years_of_experience = $3,
                breed = $4,
                salary = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.years_of_experience)
            .bind(&input.breed)
            .bind(input.salary)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite only the salary. Returns `None` if the cat does not exist.
    pub async fn update_salary(
        pool: &PgPool,
        id: DbId,
        salary: f64,
    ) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!(
            "UPDATE spy_cats SET salary = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpyCat>(&query)
            .bind(id)
            .bind(salary)
            .fetch_optional(pool)
            .await
    }

    /// Delete a cat by ID. Returns `true` if a row was removed.
    ///
    /// Missions referencing the cat keep existing; the foreign key clears
    /// their `assigned_cat_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spy_cats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

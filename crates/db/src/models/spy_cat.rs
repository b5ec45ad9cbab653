//! Spy cat entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycats_core::types::{DbId, Timestamp};
use spycats_core::validation::not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `spy_cats` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SpyCat {
    pub id: DbId,
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    pub salary: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a cat. Also the full-replacement body for updates.
///
/// The breed is not checked here: it needs a catalog lookup, which the
/// HTTP layer performs after these field rules pass.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpyCat {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Years of experience must be a positive number"))]
    pub years_of_experience: i32,
    pub breed: String,
    #[validate(range(min = 0.0, message = "Salary must be a positive number"))]
    pub salary: f64,
}

/// DTO for the salary-only update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSalary {
    #[validate(range(min = 0.0, message = "Salary must be a positive number"))]
    pub salary: f64,
}

//! Target entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycats_core::types::{DbId, Timestamp};
use spycats_core::validation::not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `targets` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Target {
    pub id: DbId,
    pub mission_id: DbId,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a target created alongside its mission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTarget {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Country must not be empty"))]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Notes cannot exceed 200 characters"))]
    pub notes: String,
}

/// DTO for replacing a target's notes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTargetNotes {
    #[validate(length(max = 200, message = "Notes cannot exceed 200 characters"))]
    pub new_notes: String,
}

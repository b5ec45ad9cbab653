//! Mission entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycats_core::types::{DbId, Timestamp};
use spycats_core::validation::not_blank;
use sqlx::FromRow;
use validator::Validate;

use crate::models::spy_cat::SpyCat;
use crate::models::target::{CreateTarget, Target};

/// A row from the `missions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub assigned_cat_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a mission together with its targets.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMission {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Description must not be empty"))]
    pub description: String,
    /// Id of the cat to put on the mission right away.
    pub assigned_cat: Option<DbId>,
    #[validate(nested)]
    pub targets: Vec<CreateTarget>,
}

/// A mission with its assigned cat and targets resolved, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MissionDetail {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub assigned_cat: Option<SpyCat>,
    pub is_completed: bool,
    pub targets: Vec<Target>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MissionDetail {
    pub fn assemble(mission: Mission, assigned_cat: Option<SpyCat>, targets: Vec<Target>) -> Self {
        Self {
            id: mission.id,
            name: mission.name,
            description: mission.description,
            assigned_cat,
            is_completed: mission.is_completed,
            targets,
            created_at: mission.created_at,
            updated_at: mission.updated_at,
        }
    }
}

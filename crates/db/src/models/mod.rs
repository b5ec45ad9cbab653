//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs carrying field-level rules

pub mod mission;
pub mod spy_cat;
pub mod target;

//! Repository layer: one unit struct per table with async CRUD functions.

pub mod mission_repo;
pub mod spy_cat_repo;
pub mod target_repo;

pub use mission_repo::MissionRepo;
pub use spy_cat_repo::SpyCatRepo;
pub use target_repo::{TargetCompletion, TargetRepo};

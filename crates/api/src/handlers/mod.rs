//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, apply the business rules from `spycats_core`,
//! delegate persistence to the repositories in `spycats_db` and map errors
//! via [`crate::error::AppError`].

pub mod mission;
pub mod spy_cat;

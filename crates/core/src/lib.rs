//! Domain types and business rules for the spy cat agency.
//!
//! Everything in this crate is free of I/O: the database and HTTP layers
//! call into these functions to decide whether an operation is allowed.

pub mod breed;
pub mod error;
pub mod mission;
pub mod pagination;
pub mod types;
pub mod validation;

//! Client for the external cat breed catalog.
//!
//! The catalog is a read-only HTTP service listing every recognised breed.
//! [`client::BreedCatalogClient`] implements the core
//! [`spycats_core::breed::BreedCatalog`] seam on top of it.

pub mod client;

pub use client::{BreedCatalogClient, CatalogError};

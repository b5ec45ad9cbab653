//! Breed catalog seam and breed matching.
//!
//! Cat records may only carry a breed that the external catalog knows about.
//! The catalog is consulted on every create and full update; matching is
//! case-insensitive so `"maine coon"` and `"Maine Coon"` are the same breed.

use async_trait::async_trait;

use crate::error::CoreError;

/// Source of the list of valid breed names.
#[async_trait]
pub trait BreedCatalog: Send + Sync {
    /// Fetch every breed name the catalog currently knows.
    async fn breed_names(&self) -> Result<Vec<String>, CoreError>;
}

/// Case-folded form of a breed name used for comparison.
pub fn normalize_breed(name: &str) -> String {
    name.to_lowercase()
}

/// Returns `true` if `breed` matches any of `known` ignoring case.
pub fn is_known_breed<S: AsRef<str>>(known: &[S], breed: &str) -> bool {
    let wanted = normalize_breed(breed);
    known
        .iter()
        .any(|candidate| normalize_breed(candidate.as_ref()) == wanted)
}

/// Look `breed` up in `catalog`.
///
/// Returns `Ok(false)` for an unknown breed and an error only when the
/// catalog itself could not be read.
pub async fn check_breed(catalog: &dyn BreedCatalog, breed: &str) -> Result<bool, CoreError> {
    let names = catalog.breed_names().await?;
    Ok(is_known_breed(&names, breed))
}

/// Fixed in-memory catalog, used when no remote catalog is reachable
/// (tests, offline development).
#[derive(Debug, Clone, Default)]
pub struct StaticBreedCatalog {
    names: Vec<String>,
}

impl StaticBreedCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl BreedCatalog for StaticBreedCatalog {
    async fn breed_names(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.names.clone())
    }
}

//! Mission and target guard rules.
//!
//! A target moves `Open -> Completed` and never back. A mission moves
//! `InProgress -> Completed` automatically once every one of its targets is
//! completed. While a mission has no assigned cat its targets are frozen.

use crate::error::CoreError;
use crate::types::DbId;

/// Which cat-assignment change is being attempted on a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatChange {
    Assign,
    Remove,
}

impl CatChange {
    fn rejection(self) -> &'static str {
        match self {
            Self::Assign => "Cannot assign a cat to a completed mission.",
            Self::Remove => "Cannot remove a cat from a completed mission.",
        }
    }
}

/// Target edits (notes, completion) require a cat working the mission.
pub fn ensure_cat_assigned(assigned_cat_id: Option<DbId>) -> Result<DbId, CoreError> {
    assigned_cat_id.ok_or_else(|| {
        CoreError::Conflict("Cannot modify mission without an assigned cat.".into())
    })
}

/// Error for an edit to a target that is already frozen.
pub fn target_frozen() -> CoreError {
    CoreError::Conflict("Cannot modify completed target or mission.".into())
}

/// Notes are frozen once the target or its mission is completed.
pub fn ensure_target_editable(
    target_completed: bool,
    mission_completed: bool,
) -> Result<(), CoreError> {
    if target_completed || mission_completed {
        return Err(target_frozen());
    }
    Ok(())
}

/// The assigned cat of a completed mission cannot change.
pub fn ensure_cat_change_allowed(
    mission_completed: bool,
    change: CatChange,
) -> Result<(), CoreError> {
    if mission_completed {
        return Err(CoreError::Conflict(change.rejection().into()));
    }
    Ok(())
}

/// A mission with a cat on it cannot be deleted.
pub fn ensure_mission_deletable(assigned_cat_id: Option<DbId>) -> Result<(), CoreError> {
    if assigned_cat_id.is_some() {
        return Err(CoreError::Conflict(
            "Cannot delete mission assigned to a cat.".into(),
        ));
    }
    Ok(())
}

/// Whether a mission whose targets are in `target_states` is completed.
///
/// Evaluated after every target completion, including repeated completions
/// of the same target. An empty iterator yields `true`, but the check only
/// runs right after one of the mission's targets was marked.
pub fn all_targets_completed<I>(target_states: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    target_states.into_iter().all(|done| done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn cat_required_for_target_edits() {
        assert_matches!(ensure_cat_assigned(None), Err(CoreError::Conflict(_)));
        assert_eq!(ensure_cat_assigned(Some(7)).unwrap(), 7);
    }

    #[test]
    fn open_target_in_open_mission_is_editable() {
        assert!(ensure_target_editable(false, false).is_ok());
    }

    #[test]
    fn completed_target_is_frozen() {
        assert_matches!(
            ensure_target_editable(true, false),
            Err(CoreError::Conflict(msg)) if msg == "Cannot modify completed target or mission."
        );
    }

    #[test]
    fn target_of_completed_mission_is_frozen() {
        assert!(ensure_target_editable(false, true).is_err());
    }

    #[test]
    fn completed_mission_rejects_assignment_changes() {
        assert_matches!(
            ensure_cat_change_allowed(true, CatChange::Assign),
            Err(CoreError::Conflict(msg)) if msg.contains("assign")
        );
        assert_matches!(
            ensure_cat_change_allowed(true, CatChange::Remove),
            Err(CoreError::Conflict(msg)) if msg.contains("remove")
        );
    }

    #[test]
    fn open_mission_accepts_assignment_changes() {
        assert!(ensure_cat_change_allowed(false, CatChange::Assign).is_ok());
        assert!(ensure_cat_change_allowed(false, CatChange::Remove).is_ok());
    }

    #[test]
    fn mission_with_cat_cannot_be_deleted() {
        assert_matches!(ensure_mission_deletable(Some(1)), Err(CoreError::Conflict(_)));
        assert!(ensure_mission_deletable(None).is_ok());
    }

    #[test]
    fn mission_completes_only_when_every_target_is_done() {
        assert!(all_targets_completed([true, true, true]));
        assert!(!all_targets_completed([true, false, true]));
        assert!(all_targets_completed([true]));
    }
}

//! Integration tests for the mission and target repositories.
//!
//! Exercises:
//! - Atomic mission + target creation
//! - Target completion with mission roll-up
//! - Cascade delete of targets, SET NULL on cat delete

use assert_matches::assert_matches;
use sqlx::PgPool;
use spycats_db::models::mission::CreateMission;
use spycats_db::models::spy_cat::CreateSpyCat;
use spycats_db::models::target::CreateTarget;
use spycats_db::repositories::{MissionRepo, SpyCatRepo, TargetRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_cat(pool: &PgPool) -> i64 {
    SpyCatRepo::create(
        pool,
        &CreateSpyCat {
            name: "Whiskers".into(),
            years_of_experience: 5,
            breed: "Siamese".into(),
            salary: 1000.0,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_mission(assigned_cat: Option<i64>, targets: &[&str]) -> CreateMission {
    CreateMission {
        name: "Mission".into(),
        description: "Description".into(),
        assigned_cat,
        targets: targets
            .iter()
            .map(|name| CreateTarget {
                name: name.to_string(),
                country: "Ukraine".into(),
                notes: String::new(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_targets(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (mission, targets) =
        MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A", "B"]))
            .await
            .unwrap();

    assert_eq!(mission.assigned_cat_id, Some(cat_id));
    assert!(!mission.is_completed);
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.mission_id == mission.id && !t.is_completed));

    let stored = TargetRepo::list_by_mission(&pool, mission.id).await.unwrap();
    assert_eq!(stored, targets);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_dangling_cat_writes_nothing(pool: PgPool) {
    let result =
        MissionRepo::create_with_targets(&pool, &new_mission(Some(9999), &["A"])).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    assert_eq!(MissionRepo::count(&pool).await.unwrap(), 0);
    let targets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM targets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(targets, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_target_rolls_back_mission(pool: PgPool) {
    let mut input = new_mission(None, &["A", "B"]);
    input.targets[1].notes = "x".repeat(201);

    let result = MissionRepo::create_with_targets(&pool, &input).await;
    assert!(result.is_err());
    assert_eq!(MissionRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_targets_for_several_missions(pool: PgPool) {
    let (first, _) = MissionRepo::create_with_targets(&pool, &new_mission(None, &["A", "B"]))
        .await
        .unwrap();
    let (second, _) = MissionRepo::create_with_targets(&pool, &new_mission(None, &["C"]))
        .await
        .unwrap();
    MissionRepo::create_with_targets(&pool, &new_mission(None, &["D"]))
        .await
        .unwrap();

    let targets = TargetRepo::list_by_missions(&pool, &[first.id, second.id])
        .await
        .unwrap();
    let names: Vec<_> = targets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// Completion roll-up
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_rolls_up_on_last_target(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (mission, targets) =
        MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A", "B"]))
            .await
            .unwrap();

    let first = TargetRepo::complete(&pool, targets[0].id).await.unwrap().unwrap();
    assert!(first.target.is_completed);
    assert!(!first.mission_completed);
    let stored = MissionRepo::find_by_id(&pool, mission.id).await.unwrap().unwrap();
    assert!(!stored.is_completed);

    let again = TargetRepo::complete(&pool, targets[0].id).await.unwrap().unwrap();
    assert!(!again.mission_completed);

    let last = TargetRepo::complete(&pool, targets[1].id).await.unwrap().unwrap();
    assert!(last.mission_completed);
    let stored = MissionRepo::find_by_id(&pool, mission.id).await.unwrap().unwrap();
    assert!(stored.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_missing_target_returns_none(pool: PgPool) {
    assert!(TargetRepo::complete(&pool, 4242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_completions_close_mission(pool: PgPool) {
    let cat_id = new_cat(&pool).await;

    for _ in 0..25 {
        let (mission, targets) =
            MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A", "B"]))
                .await
                .unwrap();

        let (first, second) = tokio::join!(
            TargetRepo::complete(&pool, targets[0].id),
            TargetRepo::complete(&pool, targets[1].id),
        );
        let first = first.unwrap().unwrap();
        let second = second.unwrap().unwrap();
        assert!(first.mission_completed || second.mission_completed);

        let stored = MissionRepo::find_by_id(&pool, mission.id).await.unwrap().unwrap();
        assert!(stored.is_completed, "mission {} left open", mission.id);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_notes(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (_, targets) =
        MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A"]))
            .await
            .unwrap();

    let updated = TargetRepo::update_notes(&pool, targets[0].id, "Seen near the docks")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.notes, "Seen near the docks");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_notes_skips_frozen_targets(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (_, targets) =
        MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A", "B"]))
            .await
            .unwrap();
    TargetRepo::complete(&pool, targets[0].id).await.unwrap().unwrap();

    // Completed target.
    assert!(TargetRepo::update_notes(&pool, targets[0].id, "late")
        .await
        .unwrap()
        .is_none());

    // Open target of a mission without a cat.
    let (unassigned, open) = MissionRepo::create_with_targets(&pool, &new_mission(None, &["C"]))
        .await
        .unwrap();
    assert!(TargetRepo::update_notes(&pool, open[0].id, "late")
        .await
        .unwrap()
        .is_none());

    // Open target of a completed mission.
    TargetRepo::complete(&pool, targets[1].id).await.unwrap().unwrap();
    sqlx::query("UPDATE targets SET is_completed = FALSE WHERE id = $1")
        .bind(targets[1].id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(TargetRepo::update_notes(&pool, targets[1].id, "late")
        .await
        .unwrap()
        .is_none());

    let stored = TargetRepo::list_by_mission(&pool, unassigned.id).await.unwrap();
    assert_eq!(stored[0].notes, "");
}

// ---------------------------------------------------------------------------
// Assignment and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_and_clear_assigned_cat(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (mission, _) = MissionRepo::create_with_targets(&pool, &new_mission(None, &[]))
        .await
        .unwrap();

    let assigned = MissionRepo::set_assigned_cat(&pool, mission.id, Some(cat_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.assigned_cat_id, Some(cat_id));

    let cleared = MissionRepo::set_assigned_cat(&pool, mission.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.assigned_cat_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_targets(pool: PgPool) {
    let (mission, targets) = MissionRepo::create_with_targets(&pool, &new_mission(None, &["A", "B"]))
        .await
        .unwrap();

    assert!(MissionRepo::delete(&pool, mission.id).await.unwrap());
    assert!(TargetRepo::find_by_id(&pool, targets[0].id).await.unwrap().is_none());
    assert!(TargetRepo::list_by_mission(&pool, mission.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_cat_clears_assignment(pool: PgPool) {
    let cat_id = new_cat(&pool).await;
    let (mission, _) = MissionRepo::create_with_targets(&pool, &new_mission(Some(cat_id), &["A"]))
        .await
        .unwrap();

    assert!(SpyCatRepo::delete(&pool, cat_id).await.unwrap());

    let stored = MissionRepo::find_by_id(&pool, mission.id).await.unwrap().unwrap();
    assert_eq!(stored.assigned_cat_id, None);
}

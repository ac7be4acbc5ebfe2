mod common;

use chrono::Utc;

use ironlift::models::{ActiveSession, SetUpdate};
use ironlift::repositories::{PreferenceRepository, SnapshotRepository};

#[tokio::test]
async fn test_snapshot_round_trip_empty_session() {
    let pool = common::setup_test_db();
    let repo = SnapshotRepository::new(pool);

    let mut session = ActiveSession::start_empty(Utc::now());
    session.update_set(0, SetUpdate::Weight(80.0));
    session.update_set(0, SetUpdate::Reps(10));
    session.toggle_set(0);
    session.add_set();
    session.tick();

    repo.save(&session).await.unwrap();
    let restored = repo.load().await.unwrap().expect("snapshot should exist");

    assert_eq!(restored.sets(), session.sets());
    assert_eq!(restored.timer_secs(), session.timer_secs());
    assert_eq!(restored.session_start(), session.session_start());
    assert_eq!(restored.mode_label(), "empty");
}

#[tokio::test]
async fn test_snapshot_round_trip_plan_session() {
    let pool = common::setup_test_db();
    let repo = SnapshotRepository::new(pool);

    let mut session = ActiveSession::start_plan(common::push_day_plan(), "Mon".to_string(), Utc::now());
    session.toggle_set(1);
    session.go_to_exercise(1);
    session.update_set(0, SetUpdate::Weight(62.5));

    repo.save(&session).await.unwrap();
    let restored = repo.load().await.unwrap().expect("snapshot should exist");

    assert_eq!(restored.mode_label(), "plan");
    assert_eq!(restored.day(), Some("Mon"));
    assert_eq!(restored.exercise_index(), 1);
    assert_eq!(restored.sets(), session.sets());
    assert_eq!(restored.set_counts(), session.set_counts());
}

#[tokio::test]
async fn test_save_is_last_write_wins() {
    let pool = common::setup_test_db();
    let repo = SnapshotRepository::new(pool);

    repo.save(&ActiveSession::start_empty(Utc::now())).await.unwrap();
    let plan_session = ActiveSession::start_plan(common::push_day_plan(), "Mon".to_string(), Utc::now());
    repo.save(&plan_session).await.unwrap();

    let restored = repo.load().await.unwrap().expect("snapshot should exist");
    assert_eq!(restored.mode_label(), "plan");
}

#[tokio::test]
async fn test_corrupt_snapshot_loads_as_absent() {
    let pool = common::setup_test_db();

    {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO active_session (slot, payload, updated_at) VALUES (1, '{not json', datetime('now'))",
            [],
        )
        .unwrap();
    }

    let repo = SnapshotRepository::new(pool);
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_removes_snapshot() {
    let pool = common::setup_test_db();
    let repo = SnapshotRepository::new(pool);

    repo.save(&ActiveSession::start_empty(Utc::now())).await.unwrap();
    repo.clear().await.unwrap();
    assert!(repo.load().await.unwrap().is_none());

    // Clearing an already-empty slot is fine.
    repo.clear().await.unwrap();
}

#[tokio::test]
async fn test_last_used_hint_round_trip() {
    let pool = common::setup_test_db();
    let repo = PreferenceRepository::new(pool);

    assert!(repo.last_used().await.unwrap().is_none());

    let plan = common::push_day_plan();
    repo.record_plan_mode(&plan, "Mon").await.unwrap();
    let last = repo.last_used().await.unwrap().expect("hint should exist");
    assert_eq!(last.mode, "plan");
    assert_eq!(last.plan_id, Some(42));
    assert_eq!(last.plan_day.as_deref(), Some("Mon"));
    assert_eq!(last.plan_name.as_deref(), Some("Push Day"));

    repo.record_empty_mode().await.unwrap();
    let last = repo.last_used().await.unwrap().expect("hint should exist");
    assert_eq!(last.mode, "empty");
    assert_eq!(last.plan_id, None);
    assert_eq!(last.plan_day, None);
    assert_eq!(last.plan_name, None);
}

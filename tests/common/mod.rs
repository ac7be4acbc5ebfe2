use serde_json::json;

use ironlift::clients::{HistoryClient, PlanClient};
use ironlift::controller::SessionController;
use ironlift::db::{create_memory_pool, DbPool};
use ironlift::migrations::run_migrations_for_tests;
use ironlift::models::TrainingPlan;
use ironlift::repositories::{PreferenceRepository, SnapshotRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_controller(pool: &DbPool, base_url: &str) -> SessionController {
    let http = reqwest::Client::new();
    SessionController::new(
        SnapshotRepository::new(pool.clone()),
        PreferenceRepository::new(pool.clone()),
        PlanClient::new(http.clone(), base_url),
        HistoryClient::new(http, base_url),
    )
}

/// Plan 42: two exercises on Mon, an explicitly configured but empty Thu.
pub fn push_day_plan_json() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "Push Day",
        "template_id": "push",
        "template_name": "Push",
        "days_of_week": ["Mon", "Thu"],
        "exercises_by_day": {
            "Mon": [
                {
                    "name": "Bench Press",
                    "sets": [
                        {"type": "warmup", "weight": "60", "reps": "10"},
                        {"type": "normal", "weight": "100", "reps": "5"}
                    ]
                },
                {
                    "name": "Overhead Press",
                    "sets": [
                        {"type": "normal", "weight": "60", "reps": "8"}
                    ]
                }
            ],
            "Thu": []
        },
        "created_at": "2026-01-05T08:00:00Z"
    })
}

pub fn push_day_plan() -> TrainingPlan {
    serde_json::from_value(push_day_plan_json()).expect("plan fixture should deserialize")
}

pub fn history_item_json() -> serde_json::Value {
    json!({
        "id": 7,
        "title": "Push Day",
        "workout_date": "2026-03-02",
        "duration_minutes": 42,
        "volume_kg": 1580.0,
        "sets": 3,
        "workout_sets": [],
        "created_at": "2026-03-02T19:00:00Z"
    })
}

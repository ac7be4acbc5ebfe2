use super::format_time;
use crate::repositories::{PreferenceRepository, SnapshotRepository};

pub async fn show(
    snapshots: &SnapshotRepository,
    preferences: &PreferenceRepository,
) -> anyhow::Result<()> {
    match snapshots.load().await? {
        Some(session) => {
            let (done, total) = session.set_counts();
            println!(
                "Suspended {} workout: {}",
                session.mode_label(),
                session.title()
            );
            if let Some(name) = session.current_exercise_name() {
                println!(
                    "  exercise {} of {}: {}",
                    session.exercise_index() + 1,
                    session.total_exercises(),
                    name
                );
            }
            println!(
                "  elapsed {} | {}/{} sets done",
                format_time(session.timer_secs()),
                done,
                total
            );
            println!("Run `ironlift resume` to continue.");
        }
        None => println!("No suspended workout session."),
    }

    if let Some(last) = preferences.last_used().await? {
        match last.plan_name {
            Some(name) => {
                let day = last.plan_day.unwrap_or_default();
                if day.is_empty() {
                    println!("Last used: {}", name);
                } else {
                    println!("Last used: {} ({})", name, day);
                }
            }
            None => println!("Last used: {} workout", last.mode),
        }
    }
    Ok(())
}

//! Interactive session tracking
//!
//! Runs the active workout on a single task: a 1 Hz ticker advances the
//! timer while stdin commands mutate the session, multiplexed through
//! `select!` so every mutation is serialized on one event loop.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use super::format_time;
use crate::controller::{FinishOutcome, SessionController};
use crate::models::SetUpdate;
use crate::repositories::SnapshotRepository;

#[derive(PartialEq)]
enum Flow {
    Continue,
    Exit,
}

pub async fn start(
    controller: &mut SessionController,
    snapshots: &SnapshotRepository,
    plan: Option<i64>,
    day: Option<String>,
) -> anyhow::Result<()> {
    if snapshots.load().await?.is_some() {
        println!(
            "An unfinished session exists and will be replaced; use `ironlift resume` to continue it instead."
        );
    }
    match plan {
        Some(plan_id) => controller.start_from_plan(plan_id, day.as_deref()).await?,
        None => controller.start_empty().await?,
    }
    run(controller).await
}

pub async fn resume(controller: &mut SessionController) -> anyhow::Result<()> {
    if !controller.resume().await? {
        println!("No suspended session to resume.");
        return Ok(());
    }
    run(controller).await
}

async fn run(controller: &mut SessionController) -> anyhow::Result<()> {
    render(controller);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; consume it so the timer
    // starts counting a full second from now.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.tick().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Session saved. Run `ironlift resume` to continue.");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(input) => {
                        if dispatch(controller, input.trim()).await? == Flow::Exit {
                            break;
                        }
                    }
                    None => {
                        println!("Session saved. Run `ironlift resume` to continue.");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

async fn dispatch(controller: &mut SessionController, input: &str) -> anyhow::Result<Flow> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    match tokens.as_slice() {
        [] => {}
        ["show"] => render(controller),
        ["help"] => print_help(),
        ["done", raw] => match parse_position(raw) {
            Some(index) => {
                controller.toggle_set(index).await?;
                render(controller);
            }
            None => println!("Usage: done <set>"),
        },
        ["weight", raw_index, raw_value] => {
            match (parse_position(raw_index), raw_value.parse::<f64>()) {
                (Some(index), Ok(value)) => {
                    controller.update_set(index, SetUpdate::Weight(value)).await?;
                    render(controller);
                }
                _ => println!("Usage: weight <set> <kg>"),
            }
        }
        ["reps", raw_index, raw_value] => {
            match (parse_position(raw_index), raw_value.parse::<u32>()) {
                (Some(index), Ok(value)) => {
                    controller.update_set(index, SetUpdate::Reps(value)).await?;
                    render(controller);
                }
                _ => println!("Usage: reps <set> <count>"),
            }
        }
        ["add"] => {
            controller.add_set().await?;
            render(controller);
        }
        ["next"] => {
            let current = controller.session().map(|s| s.exercise_index()).unwrap_or(0);
            controller.go_to_exercise(current as i64 + 1).await?;
            render(controller);
        }
        ["prev"] => {
            let current = controller.session().map(|s| s.exercise_index()).unwrap_or(0);
            controller.go_to_exercise(current as i64 - 1).await?;
            render(controller);
        }
        ["goto", raw] => match parse_position(raw) {
            Some(index) => {
                controller.go_to_exercise(index as i64).await?;
                render(controller);
            }
            None => println!("Usage: goto <exercise>"),
        },
        ["finish"] => return finish(controller, false).await,
        ["finish!"] => return finish(controller, true).await,
        ["abandon"] => {
            println!("This discards the session without saving history. Type `abandon!` to confirm.");
        }
        ["abandon!"] => {
            controller.abandon().await?;
            println!("Workout abandoned.");
            return Ok(Flow::Exit);
        }
        ["quit"] | ["q"] => {
            println!("Session saved. Run `ironlift resume` to continue.");
            return Ok(Flow::Exit);
        }
        _ => println!("Unknown command; type `help` for the list."),
    }
    Ok(Flow::Continue)
}

async fn finish(controller: &mut SessionController, force: bool) -> anyhow::Result<Flow> {
    match controller.finish(force).await {
        Ok(FinishOutcome::ConfirmationRequired) => {
            println!("Not all sets are marked done. Type `finish!` to finish anyway.");
            Ok(Flow::Continue)
        }
        Ok(FinishOutcome::Completed(item)) => {
            println!(
                "Workout saved: {} ({} sets, {:.0} kg volume, {} min).",
                item.title, item.sets, item.volume_kg, item.duration_minutes
            );
            Ok(Flow::Exit)
        }
        Err(err) if err.is_retryable() => {
            println!(
                "Unable to save workout session: {}. The session is still active; try `finish` again.",
                err
            );
            Ok(Flow::Continue)
        }
        Err(err) => Err(err.into()),
    }
}

/// 1-based display position -> 0-based index.
fn parse_position(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}

fn render(controller: &SessionController) {
    let Some(session) = controller.session() else {
        return;
    };
    let (done, total) = session.set_counts();
    println!();
    match session.current_exercise_name() {
        Some(name) => println!(
            "{} ({}) - {} | exercise {} of {} | {} | {}/{} sets done",
            session.title(),
            session.day().unwrap_or(""),
            name,
            session.exercise_index() + 1,
            session.total_exercises(),
            format_time(session.timer_secs()),
            done,
            total
        ),
        None => println!(
            "{} | {} | {}/{} sets done",
            session.title(),
            format_time(session.timer_secs()),
            done,
            total
        ),
    }
    println!("  #   previous     weight   reps   done   type");
    for (idx, set) in session.sets().iter().enumerate() {
        println!(
            "  {:<3} {:<12} {:<8} {:<6} {:<6} {}",
            set.id,
            set.prev,
            set.weight,
            set.reps,
            if set.done { "[x]" } else { "[ ]" },
            session.set_type_label(idx)
        );
    }
}

fn print_help() {
    println!();
    println!("Commands: done <set> | weight <set> <kg> | reps <set> <count> | add");
    println!("          next | prev | goto <exercise> | show | finish | abandon | quit");
}

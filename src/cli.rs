use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ironlift", version, about = "Workout session tracker")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new workout session and track it interactively
    Start {
        /// Start from a saved training plan instead of an empty session
        #[arg(long)]
        plan: Option<i64>,

        /// Weekday to train (e.g. Mon); defaults to today when the plan
        /// runs today, else the plan's first configured day
        #[arg(long, requires = "plan")]
        day: Option<String>,
    },

    /// Resume the suspended workout session
    Resume,

    /// List saved training plans
    Plans {
        /// Only plans visible to this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Show whether a suspended session exists
    Status,
}

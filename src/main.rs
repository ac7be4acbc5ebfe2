use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ironlift::cli::{Cli, Commands};
use ironlift::clients::{HistoryClient, PlanClient};
use ironlift::commands;
use ironlift::config::Config;
use ironlift::controller::SessionController;
use ironlift::db;
use ironlift::migrations;
use ironlift::repositories::{PreferenceRepository, SnapshotRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ironlift=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    let cli = Cli::parse();

    tracing::debug!("Opening session database: {}", config.database_url);
    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;
    let plan_client = PlanClient::new(http.clone(), &config.api_base_url);
    let history_client = HistoryClient::new(http, &config.api_base_url);

    let snapshots = SnapshotRepository::new(pool.clone());
    let preferences = PreferenceRepository::new(pool.clone());

    let mut controller = SessionController::new(
        snapshots.clone(),
        preferences.clone(),
        plan_client.clone(),
        history_client.clone(),
    );

    match cli.cmd {
        Commands::Start { plan, day } => {
            commands::session::start(&mut controller, &snapshots, plan, day).await?;
        }
        Commands::Resume => {
            commands::session::resume(&mut controller).await?;
        }
        Commands::Plans { user } => {
            let user = user.or_else(|| config.user_id.clone());
            commands::plans::list(&plan_client, user.as_deref()).await?;
        }
        Commands::Status => {
            commands::status::show(&snapshots, &preferences).await?;
        }
    }

    Ok(())
}

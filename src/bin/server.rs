use std::fs::create_dir_all;

use anyhow::Context;
use trivia_api::db;
use trivia_api::server::app::{run_server, AppState};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load settings")?;

    let static_dir = settings.static_dir.clone();
    if !static_dir.exists() {
        create_dir_all(&static_dir).context("Failed to create directory for static content")?;
    }
    if !static_dir.is_dir() {
        anyhow::bail!("static_dir should be a directory or not exist");
    }

    let pool = db::establish_connection(&settings.database_url)
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(AppState::new(pool, static_dir), &settings.address()).await
}

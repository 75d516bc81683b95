use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use trivia_api::db;
use trivia_api::db::queries::categories::{get_all_categories, import_categories};
use trivia_api::db::queries::questions::{get_all_questions, import_questions};
use trivia_api::db::queries::users::{get_users, import_users};
use trivia_api::db::{Category, Question, User};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database url, e.g. sqlite:trivia.db
    database_url: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Migrate,
    /// Import categories, questions and users from csv files
    Import { path: PathBuf },
    /// Export categories, questions and users to csv files
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pool = db::establish_connection(&cli.database_url)
        .await
        .context("Cannot connect to DB")?;
    db::run_migrations(&pool).await?;
    match cli.command {
        Commands::Migrate => tracing::info!("Migrations applied"),
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
    }
    Ok(())
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<Vec<T>> {
    let file = std::fs::File::open(&path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    let users = get_users(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    write_to(path.join("categories.csv"), categories)?;
    write_to(path.join("questions.csv"), questions)?;
    write_to(path.join("users.csv"), users)?;
    tracing::info!(path = %path.display(), "Export finished");
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(path.join("categories.csv"))?;
    let questions: Vec<Question> = read_from(path.join("questions.csv"))?;
    let users: Vec<User> = read_from(path.join("users.csv"))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        users = users.len(),
        "Importing"
    );
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    import_users(pool, users).await?;
    Ok(())
}

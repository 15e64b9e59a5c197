use dotenvy::dotenv;
use exam_buddy::{
    bot,
    config::{catalogue, database},
    core::catalogue::seed_catalogue,
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed classes and syllabus topics on first run
    match catalogue::load_default_config() {
        Ok(config) => {
            let seeded = seed_catalogue(&db, &config).await?;
            if seeded > 0 {
                info!("Seeded {seeded} catalogue rows.");
            }
        }
        Err(e) => warn!("Skipping catalogue seeding: {e}"),
    }

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, db).await
}

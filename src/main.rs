use dotenvy::dotenv;
use jewelry_desk::{
    bot,
    config::{database, shop},
    core::seed,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
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

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Shop configuration; a missing file only loses the catalog and seed data
    let config = shop::load_default_config()
        .inspect(|c| info!("Loaded configuration for {}", c.shop.name))
        .unwrap_or_else(|e| {
            warn!("{e}; continuing with the default configuration");
            shop::ShopConfig::default()
        });

    // 4. Database and tables
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Sample records for a fresh database
    seed::seed_sample_records(&db, &config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed sample records: {e}"))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, Arc::new(config), db).await
}

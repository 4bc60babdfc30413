use color_eyre::eyre::Result;
use dotenv::dotenv;
use pitchbook_api::config::ApiConfig;
use pitchbook_db::{create_pool, schema::initialize_database};
use pitchbook_notify::NotifyClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Build the notification gateway client
    let notifier = NotifyClient::from_env();

    // Start API server
    pitchbook_api::start_server(config, db_pool, notifier).await?;

    Ok(())
}

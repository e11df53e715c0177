//! Bootstrap binary: prepares the database and seeds reference data.

use dotenvy::dotenv;
use pavilion::{
    config::{database, rules},
    errors::Result,
};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can be set externally
    dotenv().ok();

    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    if Path::new("config.toml").exists() {
        let config = rules::load_default_config()
            .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;
        let inserted = rules::seed_reference_data(&db, &config)
            .await
            .inspect_err(|e| error!("Failed to seed reference data: {e}"))?;
        info!("Seeded {inserted} reference rows from config.toml.");
    } else {
        info!("No config.toml found, skipping reference data seeding.");
    }

    info!("Pavilion database is ready.");
    Ok(())
}

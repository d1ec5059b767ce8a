use tracing::info;

use corkboard::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = corkboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        corkboard::logging::init_console_only(&config.logging.level);
    }

    info!("CORKBOARD - bulletin board web application");

    let db = match Database::open(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let server = WebServer::new(&config, db);
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

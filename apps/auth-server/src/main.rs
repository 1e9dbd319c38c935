use std::sync::Arc;

use tracing::{error, info, info_span};

use auth_core::{SessionSettings, SessionStore};
use auth_infrastructure::{cache, RedisStore};
use auth_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    if std::env::var("LOG_FORMAT").as_deref() == Ok("pretty") {
        auth_shared::telemetry::init_pretty_telemetry();
    } else {
        auth_shared::telemetry::init_telemetry();
    }

    info!("Auth server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Redis
    let pool = match cache::connect(&config.redis).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize redis client: {}", e);
            std::process::exit(1);
        }
    };

    // Build session store
    let settings = SessionSettings::from_config(&config.session);
    let sessions = SessionStore::new(Arc::new(RedisStore::new(pool)), settings)
        .with_span(info_span!("session_store", service = %config.app.name, env = %config.app.env));
    info!(
        base_duration_secs = sessions.settings().base_duration().as_secs(),
        "Session store ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping auth server");

    Ok(())
}

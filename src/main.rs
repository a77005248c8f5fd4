//! Entry point: load config, wire the auth and webhook services, and run the server.

use pusher_server::config::Config;
use pusher_server::services::ValidationRules;
use pusher_server::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rules = ValidationRules {
        batch_event_data_size_limit: config.options.batch_event_data_size_limit(),
        ..ValidationRules::default()
    };
    let state = AppState::new(&config.credentials, rules);
    let app = create_app(state);

    tracing::info!(
        addr = %config.server_addr,
        app_id = %config.credentials.app_id,
        api = %config.options.base_url(),
        "listening"
    );
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

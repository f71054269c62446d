use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dorixona::application::services::SessionContext;
use dorixona::infrastructure::{
    ApiClient, AppConfig, CliArgs, FileSessionStore, KeyringTokenStorage, StorageManager,
};
use dorixona::presentation::{App, AppSettings};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

async fn create_app() -> Result<App> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = dorixona::VERSION, api_url = %config.api_url, "Starting Dorixona");

    let tokens = Arc::new(KeyringTokenStorage::new());
    let records = Arc::new(FileSessionStore::new(storage.session_path()));

    let (client, session_events) = ApiClient::new(
        config.api_url.clone(),
        config.request_timeout(),
        tokens.clone(),
        records.clone(),
    )
    .wrap_err("Failed to create API client")?;
    let client = Arc::new(client);

    let session = SessionContext::new(tokens, records);
    session.restore().await;

    let settings = AppSettings {
        notification_duration: config.notification_duration(),
        redirect_delay: config.redirect_delay(),
        resend_cooldown: config.otp.resend_cooldown_secs,
    };

    Ok(App::new(
        client.clone(),
        client,
        session,
        session_events,
        settings,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let app = create_app().await?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}

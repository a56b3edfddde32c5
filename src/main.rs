use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use landit::application::{NotificationManager, SessionStore};
use landit::domain::session_channel;
use landit::infrastructure::{
    ApiClient, AppConfig, CliArgs, ConfigSource, StorageManager, token_storage,
};
use landit::presentation::App;

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

fn load_config(args: &CliArgs) -> Result<(AppConfig, Option<ConfigSource>)> {
    let (mut config, source) = match StorageManager::new() {
        Ok(storage) => {
            let loaded = storage.load(args.config.as_deref())?;
            (loaded.config, Some(loaded.source))
        }
        Err(e) => {
            eprintln!("landit: {e}, using default configuration");
            (AppConfig::default(), None)
        }
    };
    config.merge_with_args(args);
    Ok((config, source))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => eprintln!("landit: ignoring .env: {e}"),
        _ => {}
    }

    let args = CliArgs::parse();
    let (config, config_source) = load_config(&args)?;

    init_logging(&config)?;

    if let Some(source) = &config_source {
        if let Some(warning) = source.warning() {
            eprintln!("landit: {warning}");
            warn!(path = %source.path().display(), "Malformed config file ignored");
        } else {
            debug!(path = %source.path().display(), "Using config file");
        }
    }

    info!(
        version = landit::VERSION,
        api_url = %config.api_url,
        token_store = ?config.token_store,
        "Starting Landit"
    );

    let storage = token_storage(config.token_store)?;
    let (events_tx, events_rx) = session_channel();
    let client = Arc::new(ApiClient::with_timeout(
        config.api_url.clone(),
        config.request_timeout(),
        storage.clone(),
        events_tx,
    )?);

    let session = Arc::new(SessionStore::new(client.clone(), storage));
    let notifications = NotificationManager::new(config.notification_duration());

    let app = App::new(session, client.clone(), client, events_rx, notifications)
        .with_notifications(config.notifications.enabled);

    match app.run(args.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            warn!(error = %e, "Command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

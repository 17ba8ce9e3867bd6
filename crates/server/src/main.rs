use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scholar_watcher_core::{
    load_config, validate_config, CycleRunner, CycleScheduler, DiscordNotifier, Notifier,
    SearchProvider, SerpApiProvider, SqliteWatchStore, WatchStore,
};

use scholar_watcher_server::api::create_router;
use scholar_watcher_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("SCHOLAR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    if config.provider.api_key.is_empty() {
        warn!("No provider API key configured, cycles will fail until one is set");
    }
    if config.notifier.webhook_url.is_empty() {
        warn!("No webhook URL configured, cycles will fail until one is set");
    }

    // Create store
    let store: Arc<dyn WatchStore> = Arc::new(
        SqliteWatchStore::new(&config.database.path).context("Failed to create watch store")?,
    );
    info!("Watch store initialized");

    // Preload configured keywords (idempotent, existing terms kept)
    for term in &config.keywords {
        match store.add_keyword(term) {
            Ok(kw) => info!("Keyword registered: {}", kw.term),
            Err(e) => warn!("Skipping configured keyword '{}': {}", term, e),
        }
    }

    // Create provider and notifier
    let provider: Arc<dyn SearchProvider> = Arc::new(
        SerpApiProvider::new(config.provider.clone())
            .context("Failed to create search provider")?,
    );
    let notifier: Arc<dyn Notifier> = Arc::new(
        DiscordNotifier::new(config.notifier.clone()).context("Failed to create notifier")?,
    );

    // Create runner and scheduler
    let runner = Arc::new(CycleRunner::new(
        config.watcher.clone(),
        Arc::clone(&store),
        provider,
        notifier,
    ));
    let scheduler = Arc::new(CycleScheduler::new(runner, config.watcher.schedule_minutes));
    scheduler.start().await;
    info!("Cycle scheduler started");

    // Create app state and router
    let state = Arc::new(AppState::new(
        config.clone(),
        store,
        Arc::clone(&scheduler),
    ));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    scheduler.stop();

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use sg_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use sg_profile::{FileGuestStore, HttpProfileStore};
use sg_session::{ChannelIdentitySource, SessionStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = sg_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = sg_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting sg-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Install the Prometheus recorder before the engine emits anything
    let prometheus = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder not installed, /metrics disabled: {e}");
            None
        }
    };

    // Consumed external stores
    let profiles = Arc::new(HttpProfileStore::new(
        &config.backend,
        config.retry.clone(),
    )?);
    let guests = Arc::new(FileGuestStore::new(config.guest_store_path()?));

    // Provider ingest point and the reconciliation engine
    let source = ChannelIdentitySource::new();
    let store = SessionStore::spawn(
        &config.registration,
        Arc::new(source.clone()),
        profiles,
        guests,
    );

    let shutdown = store.shutdown_coordinator();

    let app_state = AppState {
        store: store.clone(),
        source,
        shutdown: shutdown.clone(),
        prometheus,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut serve_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            serve_guard.wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    // The engine stops with the same coordinator; make sure it fired
    store.shutdown();

    Ok(())
}

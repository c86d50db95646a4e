//! PDVIEW Server — fuel-price display appliance
//!
//! Main entry point that wires the price ledger and video library together
//! and starts the HTTP server.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use pdview_core::config::AppConfig;
use pdview_core::error::AppError;
use pdview_database::repositories::price::PriceRepository;
use pdview_storage::library::VideoLibrary;
use pdview_storage::local::LocalVideoCatalog;

#[tokio::main]
async fn main() {
    let env = std::env::var("PDVIEW_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PDVIEW v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    if let Some(parent) = Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AppError::internal(format!("Failed to create dir '{}': {e}", parent.display()))
        })?;
    }

    // ── Step 2: Database connection + migrations + seeding ───────
    tracing::info!("Opening price ledger...");
    let db_pool = pdview_database::connection::DatabasePool::connect(&config.database)
        .await?
        .into_pool();

    pdview_database::migration::run_migrations(&db_pool).await?;

    let prices = Arc::new(PriceRepository::new(db_pool.clone()));
    prices.seed_if_empty().await?;
    tracing::info!("Price ledger ready");

    // ── Step 3: Video library ────────────────────────────────────
    tracing::info!("Initializing video library...");
    let catalog = LocalVideoCatalog::new(&config.videos.directory).await?;
    let videos = Arc::new(VideoLibrary::new(
        Arc::new(catalog),
        config.videos.base_video.clone(),
    ));

    if !Path::new(&config.videos.directory)
        .join(&config.videos.base_video)
        .exists()
    {
        tracing::warn!(
            base_video = %config.videos.base_video,
            directory = %config.videos.directory,
            "Base video file is missing; the player will have nothing to fall back to"
        );
    }
    tracing::info!("Video library ready");

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = pdview_api::state::AppState {
        config: Arc::new(config.clone()),
        prices,
        videos,
    };

    let app = pdview_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    let local_ip = detect_local_ip();
    tracing::info!("PDVIEW server listening on {addr}");
    tracing::info!("Local access:  http://localhost:{}", config.server.port);
    tracing::info!(
        "WiFi access:   http://{local_ip}:{}  (operator UI)",
        config.server.port
    );
    tracing::info!(
        "Player:        http://{local_ip}:{}/player.html",
        config.server.port
    );

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("PDVIEW server shut down gracefully");
    Ok(())
}

/// Best-effort LAN address discovery for the startup banner.
///
/// Connecting a UDP socket sends no packets; it only asks the OS which
/// interface would route to the destination.
fn detect_local_ip() -> String {
    std::net::UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "localhost".to_string())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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

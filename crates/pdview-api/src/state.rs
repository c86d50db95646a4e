//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use pdview_core::config::AppConfig;
use pdview_database::repositories::price::PriceRepository;
use pdview_storage::library::VideoLibrary;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The price ledger.
    pub prices: Arc<PriceRepository>,
    /// The video library.
    pub videos: Arc<VideoLibrary>,
}

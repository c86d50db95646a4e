//! Route definitions for the PDVIEW HTTP API.
//!
//! JSON endpoints live under `/api`; `/videos` and `/` serve raw files.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.videos.max_upload_size_bytes as usize;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new().merge(price_routes()).merge(video_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .nest_service(
            "/videos",
            ServeDir::new(&state.config.videos.directory),
        )
        .fallback_service(ServeDir::new(&state.config.server.static_dir))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Price ledger endpoints: latest, update, history
fn price_routes() -> Router<AppState> {
    Router::new()
        .route("/prices", get(handlers::price::latest_prices))
        .route("/prices/update", post(handlers::price::update_prices))
        .route("/prices/history", get(handlers::price::price_history))
}

/// Video library endpoints: list, select, upload, active, delete
fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(handlers::video::list_videos))
        .route("/videos/select", post(handlers::video::select_video))
        .route("/videos/upload", post(handlers::video::upload_video))
        .route("/videos/active", get(handlers::video::active_video))
        .route(
            "/videos/delete",
            post(handlers::video::delete_video).delete(handlers::video::delete_video),
        )
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(Duration::from_secs(cors_config.max_age_seconds))
}

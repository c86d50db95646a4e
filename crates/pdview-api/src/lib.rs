//! # pdview-api
//!
//! HTTP API layer for PDVIEW built on Axum.
//!
//! Provides the price and video REST endpoints, static/video file serving,
//! middleware (CORS, logging, body limit, timeout), and DTOs.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Price update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdateRequest {
    /// New etanol price. Must be strictly positive.
    pub etanol: f64,
    /// New gasolina price. Must be strictly positive.
    pub gasolina: f64,
}

/// Video selection / deletion request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoNameRequest {
    /// Name of the target video file.
    pub video_name: String,
}

/// Query parameters for the price history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    /// Maximum number of records to return (clamped server-side).
    pub limit: Option<u32>,
}

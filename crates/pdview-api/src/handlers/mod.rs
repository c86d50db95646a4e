//! Route handlers organized by domain.

pub mod health;
pub mod price;
pub mod video;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use pdview_core::error::AppError;
use pdview_core::result::AppResult;

/// Decode a JSON request body, mapping malformed input to a validation
/// error (HTTP 400).
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))
}

//! Price ledger handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use pdview_core::error::AppError;
use pdview_database::repositories::price::MAX_HISTORY_LIMIT;
use pdview_entity::price::PriceRecord;

use crate::dto::request::{HistoryParams, PriceUpdateRequest};
use crate::dto::response::PriceUpdateResponse;
use crate::handlers::parse_json;
use crate::state::AppState;

/// How many seconds display clients may cache the latest price. Advisory
/// only; every request within the window is still answered.
const LATEST_MAX_AGE_SECONDS: u32 = 10;

/// GET /api/prices
pub async fn latest_prices(State(state): State<AppState>) -> Result<Response, AppError> {
    let record = state.prices.latest().await?;

    Ok((
        [(
            header::CACHE_CONTROL,
            format!("max-age={LATEST_MAX_AGE_SECONDS}"),
        )],
        Json(record),
    )
        .into_response())
}

/// POST /api/prices/update
pub async fn update_prices(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PriceUpdateResponse>, AppError> {
    let req: PriceUpdateRequest = parse_json(&body)?;

    let record = state.prices.append(req.etanol, req.gasolina).await?;

    Ok(Json(PriceUpdateResponse {
        success: true,
        message: "Prices updated successfully".to_string(),
        id: record.id,
    }))
}

/// GET /api/prices/history
pub async fn price_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<PriceRecord>>, AppError> {
    let limit = params.limit.unwrap_or(MAX_HISTORY_LIMIT);
    let records = state.prices.history(limit).await?;
    Ok(Json(records))
}

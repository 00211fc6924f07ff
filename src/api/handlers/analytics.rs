//! Handler for per-link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count and metadata of a short link.
///
/// # Endpoint
///
/// `GET /analytics/{short_code}`
///
/// Reading analytics does not count as a click, and expired links are still
/// reported (with `"expired": true`).
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let stats = state.stats_service.stats(&short_code).await?;

    Ok(Json(stats.into()))
}

//! Handler for link shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /url/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "slug": "abc123",        // optional
///   "expires_in_days": 7     // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "abc123",
///   "short_url": "http://localhost:8000/r/abc123",
///   "expires_at": "2025-01-08T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: `invalid_url`, `invalid_slug`, `invalid_expiration`
/// - 409 Conflict: `slug_taken`
/// - 500 Internal Server Error: `persistence_failure`
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let mapping = state.registrar.register(payload.into()).await?;

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&mapping.short_code),
        short_code: mapping.short_code,
        expires_at: mapping.expires_at,
    }))
}

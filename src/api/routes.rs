//! API route configuration.

use crate::api::handlers::{analytics_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public shortener routes.
///
/// # Endpoints
///
/// - `POST /url/shorten`              - Register a URL (optional slug and expiry)
/// - `GET  /r/{short_code}`           - Redirect to the original URL (307)
/// - `GET  /analytics/{short_code}`   - Click count and metadata
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/url/shorten", post(shorten_handler))
        .route("/r/{short_code}", get(redirect_handler))
        .route("/analytics/{short_code}", get(analytics_handler))
}

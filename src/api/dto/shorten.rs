//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::RegisterRequest;

/// Request to shorten a single URL.
///
/// Field rules are enforced by the registrar so that every input error maps
/// to one error code; a missing `url` deserializes as empty and is rejected
/// as `invalid_url`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (absolute, with a host).
    #[serde(default)]
    pub url: String,

    /// Optional custom short code (ASCII letters and digits).
    pub slug: Option<String>,

    /// Optional lifetime in whole days. `0` expires at the moment of creation.
    pub expires_in_days: Option<i64>,
}

impl From<ShortenRequest> for RegisterRequest {
    fn from(request: ShortenRequest) -> Self {
        RegisterRequest {
            url: request.url,
            slug: request.slug,
            expires_in_days: request.expires_in_days,
        }
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

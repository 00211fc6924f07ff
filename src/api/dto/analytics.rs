//! DTOs for the analytics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::MappingStats;

/// Click count and metadata of one short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expired: bool,
}

impl From<MappingStats> for AnalyticsResponse {
    fn from(stats: MappingStats) -> Self {
        let mapping = stats.mapping;

        Self {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            clicks: mapping.clicks,
            expires_at: mapping.expires_at,
            created_at: mapping.created_at,
            expired: stats.expired,
        }
    }
}

//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure of the core ends up as exactly one [`AppError`] variant.
//! Validation variants name the offending request field in `details.field`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Invalid slug: {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("Invalid expiration: {reason}")]
    InvalidExpiration { days: i64, reason: String },

    #[error("Slug '{slug}' is already taken")]
    SlugTaken { slug: String },

    #[error("Short code '{code}' not found")]
    NotFound { code: String },

    #[error("Short code '{code}' has expired")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error("Persistence failure: {message}")]
    PersistenceFailure { message: String },
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn invalid_slug(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSlug {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_expiration(days: i64, reason: impl Into<String>) -> Self {
        Self::InvalidExpiration {
            days,
            reason: reason.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            message: message.into(),
        }
    }

    /// Stable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidSlug { .. } => "invalid_slug",
            AppError::InvalidExpiration { .. } => "invalid_expiration",
            AppError::SlugTaken { .. } => "slug_taken",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::PersistenceFailure { .. } => "persistence_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidSlug { .. }
            | AppError::InvalidExpiration { .. } => StatusCode::BAD_REQUEST,
            AppError::SlugTaken { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::PersistenceFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::InvalidUrl { .. } => json!({ "field": "url" }),
            AppError::InvalidSlug { slug, .. } => json!({ "field": "slug", "slug": slug }),
            AppError::InvalidExpiration { days, .. } => {
                json!({ "field": "expires_in_days", "expires_in_days": days })
            }
            AppError::SlugTaken { slug } => json!({ "field": "slug", "slug": slug }),
            AppError::NotFound { code } => json!({ "short_code": code }),
            AppError::Expired { code, expired_at } => {
                json!({ "short_code": code, "expired_at": expired_at })
            }
            // Store internals stay in the logs.
            AppError::PersistenceFailure { .. } => json!({}),
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::PersistenceFailure { .. } => "Failed to persist the short URL".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.public_message(),
            details: self.details(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::persistence(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

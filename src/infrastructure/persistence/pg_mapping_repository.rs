//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::utils::db_error::map_sqlx_error;

/// Column list shared by every query returning a full mapping.
const MAPPING_COLUMNS: &str = "id, original_url, short_code, clicks, expires_at, created_at";

#[derive(Debug, FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_code: Option<String>,
    clicks: i64,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(
            row.id,
            row.original_url,
            row.short_code.unwrap_or_default(),
            row.expires_at,
            row.clicks,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of `short_code` is enforced by the `url_mappings_short_code_key`
/// constraint and click counting by a single `UPDATE ... SET clicks = clicks + 1`,
/// so concurrent requests never need application-level locks.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url_mappings (original_url, short_code, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new_mapping.original_url)
        .bind(new_mapping.short_code)
        .bind(new_mapping.expires_at)
        .bind(new_mapping.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_code(&self, id: i64, short_code: &str) -> Result<UrlMapping, StoreError> {
        let sql = format!(
            "UPDATE url_mappings SET short_code = $2 \
             WHERE id = $1 AND short_code IS NULL \
             RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(id)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        row.map(UrlMapping::from)
            .ok_or(StoreError::RowNotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM url_mappings WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let sql = format!("SELECT {MAPPING_COLUMNS} FROM url_mappings WHERE short_code = $1");

        let row = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let sql = format!(
            "UPDATE url_mappings SET clicks = clicks + 1 \
             WHERE short_code = $1 \
             RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}

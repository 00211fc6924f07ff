//! Short code resolution and click accounting.

use std::sync::Arc;
use tracing::debug;

use crate::clock::Clock;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Service that turns a short code into its target URL.
///
/// A successful resolution counts exactly one click. Unknown and expired
/// codes count nothing.
pub struct ResolverService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: MappingRepository + ?Sized> ResolverService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Resolves `short_code` and records a click.
    ///
    /// The returned mapping carries the click count after this resolution.
    /// The increment is a single atomic store update, so concurrent
    /// resolutions of the same code never lose a click.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping has this code
    /// - [`AppError::Expired`] if the clock is strictly past `expires_at`
    /// - [`AppError::PersistenceFailure`] on store errors
    pub async fn resolve(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        let result = self.resolve_inner(short_code).await;

        let outcome = match &result {
            Ok(_) => "redirected",
            Err(AppError::NotFound { .. }) => "not_found",
            Err(AppError::Expired { .. }) => "expired",
            Err(_) => "error",
        };
        metrics::counter!("shortener_resolutions_total", "outcome" => outcome).increment(1);

        result
    }

    async fn resolve_inner(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        let mapping = self
            .repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found(short_code))?;

        if let Some(expires_at) = mapping.expires_at
            && mapping.is_expired_at(self.clock.now())
        {
            debug!(short_code, %expires_at, "Refusing expired short code");
            return Err(AppError::Expired {
                code: short_code.to_string(),
                expired_at: expires_at,
            });
        }

        // Expiry is immutable, so the check above still holds for the update.
        let mapping = self
            .repository
            .increment_clicks(short_code)
            .await?
            .ok_or_else(|| AppError::not_found(short_code))?;

        debug!(short_code, clicks = mapping.clicks, "Resolved short code");
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::repositories::{MockMappingRepository, StoreError};
    use chrono::{DateTime, TimeDelta, Utc};

    fn mapping(clicks: i64, expires_at: Option<DateTime<Utc>>) -> UrlMapping {
        UrlMapping::new(
            1,
            "https://example.com/target".to_string(),
            "abc123".to_string(),
            expires_at,
            clicks,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_resolve_counts_click() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some(mapping(4, None))));
        repo.expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some(mapping(5, None))));

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(Utc::now())));
        let resolved = service.resolve("abc123").await.unwrap();

        assert_eq!(resolved.original_url, "https://example.com/target");
        assert_eq!(resolved.clicks, 5);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_increment_clicks().times(0);

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(Utc::now())));
        let err = service.resolve("zzzzzzzzzz").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { code } if code == "zzzzzzzzzz"));
    }

    #[tokio::test]
    async fn test_resolve_expired_does_not_count() {
        let now = Utc::now();
        let expired_at = now - TimeDelta::seconds(1);

        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(mapping(2, Some(expired_at)))));
        repo.expect_increment_clicks().times(0);

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(now)));
        let err = service.resolve("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::Expired { expired_at: at, .. } if at == expired_at));
    }

    #[tokio::test]
    async fn test_resolve_at_exact_expiry_succeeds() {
        let now = Utc::now();

        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(mapping(0, Some(now)))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(move |_| Ok(Some(mapping(1, Some(now)))));

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(now)));
        assert_eq!(service.resolve("abc123").await.unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn test_resolve_store_failure() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(Utc::now())));
        let err = service.resolve("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::PersistenceFailure { .. }));
    }

    #[tokio::test]
    async fn test_resolve_row_vanished_between_calls() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(mapping(0, None))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(None));

        let service = ResolverService::new(Arc::new(repo), Arc::new(ManualClock::new(Utc::now())));
        let err = service.resolve("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }
}

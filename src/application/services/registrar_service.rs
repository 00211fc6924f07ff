//! Short link registration service.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeStrategy, validate_slug};
use crate::utils::url_validator::validate_url;

/// Input of a registration.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub url: String,
    pub slug: Option<String>,
    pub expires_in_days: Option<i64>,
}

/// Service that validates registrations and reserves unique short codes.
///
/// Uniqueness is decided by the store alone. A custom slug is inserted
/// directly and a conflict becomes [`AppError::SlugTaken`]; random codes are
/// regenerated on conflict up to `max_attempts` times.
pub struct RegistrarService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    strategy: CodeStrategy,
    max_attempts: usize,
}

impl<R: MappingRepository + ?Sized + 'static> RegistrarService<R> {
    /// Creates a new registrar.
    ///
    /// `max_attempts` bounds random-code retries and is clamped to at least 1.
    pub fn new(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        strategy: CodeStrategy,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            clock,
            strategy,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Registers a URL and returns the stored mapping.
    ///
    /// # Steps
    ///
    /// 1. Validate the URL, the optional slug and the optional day count
    /// 2. Custom slug: single insert, store conflict → [`AppError::SlugTaken`]
    /// 3. Otherwise assign a code with the configured [`CodeStrategy`]
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`], [`AppError::InvalidSlug`],
    ///   [`AppError::InvalidExpiration`] for bad input (nothing is written)
    /// - [`AppError::SlugTaken`] if the custom slug is in use
    /// - [`AppError::PersistenceFailure`] on store errors or exhausted retries;
    ///   partially written rows are removed first
    pub async fn register(&self, request: RegisterRequest) -> Result<UrlMapping, AppError> {
        let original_url =
            validate_url(&request.url).map_err(|e| AppError::invalid_url(e.to_string()))?;

        if let Some(slug) = &request.slug {
            validate_slug(slug)?;
        }

        let now = self.clock.now();
        let expires_at = expiry_from_days(now, request.expires_in_days)?;

        let new_mapping = NewMapping {
            original_url,
            short_code: None,
            expires_at,
            created_at: now,
        };

        let (mapping, kind) = match request.slug {
            Some(slug) => (self.register_custom(new_mapping, slug).await?, "custom"),
            None => {
                let mapping = match self.strategy {
                    CodeStrategy::Sequential => self.register_sequential(new_mapping).await?,
                    strategy => self.register_random(new_mapping, strategy).await?,
                };
                (mapping, self.strategy.name())
            }
        };

        metrics::counter!("shortener_registrations_total", "strategy" => kind).increment(1);
        info!(
            id = mapping.id,
            short_code = %mapping.short_code,
            kind,
            expires_at = ?mapping.expires_at,
            "Registered short link"
        );

        Ok(mapping)
    }

    async fn register_custom(
        &self,
        new_mapping: NewMapping,
        slug: String,
    ) -> Result<UrlMapping, AppError> {
        match self.repository.insert(new_mapping.with_code(&slug)).await {
            Ok(id) => Ok(new_mapping.into_mapping(id, slug)),
            Err(e) if e.is_short_code_conflict() => {
                debug!(%slug, "Custom slug already taken");
                Err(AppError::SlugTaken { slug })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn register_random(
        &self,
        new_mapping: NewMapping,
        strategy: CodeStrategy,
    ) -> Result<UrlMapping, AppError> {
        for attempt in 1..=self.max_attempts {
            // The id is unknown before insert; random codes do not use it.
            let code = strategy.generate(0);

            match self.repository.insert(new_mapping.with_code(&code)).await {
                Ok(id) => return Ok(new_mapping.into_mapping(id, code)),
                Err(e) if e.is_short_code_conflict() => {
                    metrics::counter!("shortener_code_collisions_total").increment(1);
                    warn!(attempt, %code, "Random short code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::persistence(format!(
            "no unique short code after {} attempts",
            self.max_attempts
        )))
    }

    /// Inserts a placeholder, encodes the assigned id, then stores the code.
    ///
    /// Runs on its own task so that an abandoned request cannot stop the
    /// write between the two phases.
    async fn register_sequential(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let repository = Arc::clone(&self.repository);

        tokio::spawn(write_sequential(repository, new_mapping))
            .await
            .map_err(|e| AppError::persistence(format!("sequential registration aborted: {e}")))?
    }
}

async fn write_sequential<R: MappingRepository + ?Sized>(
    repository: Arc<R>,
    new_mapping: NewMapping,
) -> Result<UrlMapping, AppError> {
    let id = repository.insert(new_mapping).await?;

    // Ids start at 1; encode(0) is empty and a negative id has no encoding.
    let code = u64::try_from(id)
        .map(|n| CodeStrategy::Sequential.generate(n))
        .unwrap_or_default();
    if code.is_empty() {
        rollback(repository.as_ref(), id).await;
        return Err(AppError::persistence(format!(
            "store assigned id {id}, which has no short code"
        )));
    }

    match repository.update_code(id, &code).await {
        Ok(mapping) => Ok(mapping),
        Err(e) => {
            rollback(repository.as_ref(), id).await;
            Err(e.into())
        }
    }
}

/// Deletes a partially created row. Failures are logged; the caller still
/// reports the original error.
async fn rollback<R: MappingRepository + ?Sized>(repository: &R, id: i64) {
    match repository.delete(id).await {
        Ok(true) => warn!(id, "Rolled back partial registration"),
        Ok(false) => warn!(id, "Partial registration already gone"),
        Err(e) => error!(id, error = %e, "Failed to roll back partial registration"),
    }
}

/// Computes the expiry instant `days` days after `now`.
///
/// `Some(0)` expires at `now` itself; the link resolves until the clock
/// moves strictly past it.
fn expiry_from_days(
    now: DateTime<Utc>,
    days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(days) = days else {
        return Ok(None);
    };

    if days < 0 {
        return Err(AppError::invalid_expiration(
            days,
            "expires_in_days must be a non-negative integer",
        ));
    }

    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .map(Some)
        .ok_or_else(|| AppError::invalid_expiration(days, "expires_in_days is too large"))
}

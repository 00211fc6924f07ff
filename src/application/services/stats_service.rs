//! Read-only analytics over stored mappings.

use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Snapshot of a mapping as seen by analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingStats {
    pub mapping: UrlMapping,
    /// Whether the mapping was expired at the time of the query.
    pub expired: bool,
}

/// Service for reading click counts and metadata.
///
/// Unlike resolution, reading stats never changes the click counter and
/// still answers for expired mappings.
pub struct StatsService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: MappingRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Retrieves the stored mapping for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::PersistenceFailure`] on store errors.
    pub async fn stats(&self, short_code: &str) -> Result<MappingStats, AppError> {
        let mapping = self
            .repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found(short_code))?;

        let expired = mapping.is_expired_at(self.clock.now());

        Ok(MappingStats { mapping, expired })
    }
}

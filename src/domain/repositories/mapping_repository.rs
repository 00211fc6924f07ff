//! Repository trait for URL mapping storage.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Store contract for short code mappings.
///
/// Each call is its own transaction boundary. Implementations must enforce
/// short code uniqueness themselves (a unique index, an atomic map entry);
/// callers never pre-check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a mapping and returns the store-assigned id.
    ///
    /// With `short_code: None` the row is a placeholder: it is stored but no
    /// lookup by code can reach it until [`Self::update_code`] assigns one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the short code is already in use.
    /// Returns [`StoreError::Database`] on database errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<i64, StoreError>;

    /// Assigns the short code of a placeholder row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the code is already in use.
    /// Returns [`StoreError::RowNotFound`] if `id` is unknown or already has a code.
    async fn update_code(&self, id: i64, short_code: &str) -> Result<UrlMapping, StoreError>;

    /// Removes a mapping by id.
    ///
    /// Only used to roll back a registration that failed halfway; mappings
    /// are otherwise never deleted.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Atomically adds one to the click counter and returns the updated mapping.
    ///
    /// Returns `Ok(None)` if no mapping has this code.
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

//! Process-local implementation of the mapping repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};

/// In-memory mapping store backed by two `DashMap`s.
///
/// `records` holds mappings by id; `codes` is the unique index from short code
/// to id. A code is claimed through the `codes` entry API, which makes the
/// claim atomic per key: of two racing inserts for the same code exactly one
/// sees a vacant entry. Click increments run under the record's shard write
/// lock, so no update is lost.
///
/// Placeholder rows (no code yet) live only in `records` and are unreachable
/// by code lookups.
#[derive(Debug)]
pub struct InMemoryMappingRepository {
    next_id: AtomicI64,
    records: DashMap<i64, UrlMapping>,
    codes: DashMap<String, i64>,
}

impl InMemoryMappingRepository {
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            records: DashMap::new(),
            codes: DashMap::new(),
        }
    }

    /// Number of stored rows, placeholders included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Claims `code` for `id`, failing if another row holds it.
    fn claim_code(&self, code: &str, id: i64) -> Result<(), StoreError> {
        match self.codes.entry(code.to_string()) {
            Entry::Occupied(_) => Err(StoreError::short_code_conflict()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn id_for_code(&self, code: &str) -> Option<i64> {
        self.codes.get(code).map(|id| *id)
    }
}

impl Default for InMemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<i64, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let code = new_mapping.short_code.clone();

        // The record is unreachable until the code index points at it.
        self.records.insert(
            id,
            new_mapping.into_mapping(id, code.clone().unwrap_or_default()),
        );

        if let Some(code) = code
            && let Err(e) = self.claim_code(&code, id)
        {
            self.records.remove(&id);
            return Err(e);
        }

        Ok(id)
    }

    async fn update_code(&self, id: i64, short_code: &str) -> Result<UrlMapping, StoreError> {
        // Holding the record lock while claiming keeps readers that resolve the
        // new code from seeing the row before its code is set.
        let Some(mut record) = self.records.get_mut(&id) else {
            return Err(StoreError::RowNotFound { id });
        };

        if !record.short_code.is_empty() {
            return Err(StoreError::RowNotFound { id });
        }

        self.claim_code(short_code, id)?;
        record.short_code = short_code.to_string();

        Ok(record.value().clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let Some((_, removed)) = self.records.remove(&id) else {
            return Ok(false);
        };

        if !removed.short_code.is_empty() {
            self.codes
                .remove_if(&removed.short_code, |_, owner| *owner == id);
        }

        Ok(true)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let Some(id) = self.id_for_code(short_code) else {
            return Ok(None);
        };

        Ok(self.records.get(&id).map(|record| record.value().clone()))
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let Some(id) = self.id_for_code(short_code) else {
            return Ok(None);
        };

        Ok(self.records.get_mut(&id).map(|mut record| {
            record.clicks += 1;
            record.value().clone()
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

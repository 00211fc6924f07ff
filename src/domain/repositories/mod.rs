//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod mapping_repository;
pub mod store_error;

pub use mapping_repository::MappingRepository;
pub use store_error::{SHORT_CODE_CONSTRAINT, StoreError};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;

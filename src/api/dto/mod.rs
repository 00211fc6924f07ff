//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input rules
//! live in the services, not here.

pub mod analytics;
pub mod health;
pub mod shorten;

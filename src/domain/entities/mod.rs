//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], plus the [`NewMapping`]
//! input used to create one. Entities are plain data; the only behavior they
//! carry is the expiration predicate.

pub mod url_mapping;

pub use url_mapping::{NewMapping, UrlMapping};

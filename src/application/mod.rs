//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::MappingRepository`]
//! trait and a [`crate::clock::Clock`], and are shared by the HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::registrar_service::RegistrarService`] - Validation and short code assignment
//! - [`services::resolver_service::ResolverService`] - Redirect lookups and click counting
//! - [`services::stats_service::StatsService`] - Read-only analytics

pub mod services;

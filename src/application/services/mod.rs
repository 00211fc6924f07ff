//! Business logic services for the application layer.

pub mod registrar_service;
pub mod resolver_service;
pub mod stats_service;

pub use registrar_service::{RegisterRequest, RegistrarService};
pub use resolver_service::ResolverService;
pub use stats_service::{MappingStats, StatsService};

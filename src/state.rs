//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{RegistrarService, ResolverService, StatsService};
use crate::clock::Clock;
use crate::domain::repositories::MappingRepository;
use crate::utils::code_generator::CodeStrategy;

#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<RegistrarService<dyn MappingRepository>>,
    pub resolver: Arc<ResolverService<dyn MappingRepository>>,
    pub stats_service: Arc<StatsService<dyn MappingRepository>>,
    pub repository: Arc<dyn MappingRepository>,
    pub base_url: String,
}

impl AppState {
    /// Wires the services around one store and one clock.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        clock: Arc<dyn Clock>,
        strategy: CodeStrategy,
        max_attempts: usize,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            registrar: Arc::new(RegistrarService::new(
                repository.clone(),
                clock.clone(),
                strategy,
                max_attempts,
            )),
            resolver: Arc::new(ResolverService::new(repository.clone(), clock.clone())),
            stats_service: Arc::new(StatsService::new(repository.clone(), clock)),
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public URL that redirects to the mapping with `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/r/{}", self.base_url, short_code)
    }
}

#![allow(dead_code)]

use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use quicklink::api::handlers::health_handler;
use quicklink::api::routes::routes;
use quicklink::clock::ManualClock;
use quicklink::domain::entities::NewMapping;
use quicklink::domain::repositories::MappingRepository;
use quicklink::infrastructure::persistence::InMemoryMappingRepository;
use quicklink::state::AppState;
use quicklink::utils::code_generator::CodeStrategy;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";

/// Everything a test needs to drive and inspect the service.
pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryMappingRepository>,
    pub clock: Arc<ManualClock>,
}

pub fn create_test_context(strategy: CodeStrategy) -> TestContext {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let state = AppState::new(
        repository.clone(),
        clock.clone(),
        strategy,
        5,
        BASE_URL,
    );

    TestContext {
        state,
        repository,
        clock,
    }
}

pub fn create_test_app(state: AppState) -> Router {
    routes()
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn create_test_mapping(
    repository: &InMemoryMappingRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> i64 {
    repository
        .insert(NewMapping {
            original_url: url.to_string(),
            short_code: Some(code.to_string()),
            expires_at,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

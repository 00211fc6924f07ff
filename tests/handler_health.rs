mod common;

use axum_test::TestServer;
use quicklink::api::dto::health::HealthResponse;
use quicklink::utils::code_generator::CodeStrategy;

#[tokio::test]
async fn test_health_check_healthy() {
    let ctx = common::create_test_context(CodeStrategy::default());
    let server = TestServer::new(common::create_test_app(ctx.state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<HealthResponse>();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(body.checks.store.status, "ok");
}

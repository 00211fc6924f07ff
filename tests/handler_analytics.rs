mod common;

use axum_test::TestServer;
use chrono::TimeDelta;
use quicklink::api::dto::analytics::AnalyticsResponse;
use quicklink::clock::Clock;
use quicklink::utils::code_generator::CodeStrategy;
use serde_json::Value;

#[tokio::test]
async fn test_analytics_reports_clicks() {
    let ctx = common::create_test_context(CodeStrategy::default());
    let server = TestServer::new(common::create_test_app(ctx.state.clone())).unwrap();

    common::create_test_mapping(&ctx.repository, "stats1", "https://example.com", None).await;
    server.get("/r/stats1").await;
    server.get("/r/stats1").await;

    let response = server.get("/analytics/stats1").await;

    response.assert_status_ok();
    let body = response.json::<AnalyticsResponse>();
    assert_eq!(body.short_code, "stats1");
    assert_eq!(body.original_url, "https://example.com");
    assert_eq!(body.clicks, 2);
    assert!(body.expires_at.is_none());
    assert!(!body.expired);
}

#[tokio::test]
async fn test_analytics_does_not_count_click() {
    let ctx = common::create_test_context(CodeStrategy::default());
    let server = TestServer::new(common::create_test_app(ctx.state.clone())).unwrap();

    common::create_test_mapping(&ctx.repository, "quiet", "https://example.com", None).await;

    server.get("/analytics/quiet").await.assert_status_ok();
    let body = server
        .get("/analytics/quiet")
        .await
        .json::<AnalyticsResponse>();

    assert_eq!(body.clicks, 0);
}

#[tokio::test]
async fn test_analytics_for_expired_link() {
    let ctx = common::create_test_context(CodeStrategy::default());
    let server = TestServer::new(common::create_test_app(ctx.state.clone())).unwrap();

    let expired_at = ctx.clock.now() - TimeDelta::days(1);
    common::create_test_mapping(&ctx.repository, "gone", "https://example.com", Some(expired_at))
        .await;

    let response = server.get("/analytics/gone").await;

    response.assert_status_ok();
    let body = response.json::<AnalyticsResponse>();
    assert!(body.expired);
    assert_eq!(body.expires_at, Some(expired_at));
}

#[tokio::test]
async fn test_analytics_not_found() {
    let ctx = common::create_test_context(CodeStrategy::default());
    let server = TestServer::new(common::create_test_app(ctx.state.clone())).unwrap();

    let response = server.get("/analytics/missing").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

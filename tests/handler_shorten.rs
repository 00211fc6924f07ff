mod common;

use axum_test::TestServer;
use quicklink::api::dto::shorten::ShortenResponse;
use quicklink::clock::Clock;
use quicklink::domain::repositories::MappingRepository;
use quicklink::utils::code_generator::{CodeStrategy, DEFAULT_CODE_LENGTH, decode_base62};
use serde_json::{Value, json};

fn server(strategy: CodeStrategy) -> (TestServer, common::TestContext) {
    let ctx = common::create_test_context(strategy);
    let server = TestServer::new(common::create_test_app(ctx.state.clone())).unwrap();
    (server, ctx)
}

#[tokio::test]
async fn test_shorten_random_code() {
    let (server, ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<ShortenResponse>();
    assert_eq!(body.short_code.len(), DEFAULT_CODE_LENGTH);
    assert!(body.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        body.short_url,
        format!("{}/r/{}", common::BASE_URL, body.short_code)
    );
    assert!(body.expires_at.is_none());

    let stored = ctx
        .repository
        .find_by_code(&body.short_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.original_url, "https://example.com");
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_shorten_sequential_codes_encode_ids() {
    let (server, _ctx) = server(CodeStrategy::Sequential);

    let first = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://a.example.com" }))
        .await
        .json::<ShortenResponse>();
    let second = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://b.example.com" }))
        .await
        .json::<ShortenResponse>();

    assert_eq!(first.short_code, "1");
    assert_eq!(second.short_code, "2");
    assert_eq!(decode_base62(&second.short_code), Some(2));
}

#[tokio::test]
async fn test_shorten_with_custom_slug() {
    let (server, _ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com", "slug": "abc123" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<ShortenResponse>();
    assert_eq!(body.short_code, "abc123");
    assert_eq!(body.short_url, "http://sho.rt/r/abc123");
}

#[tokio::test]
async fn test_shorten_duplicate_slug_conflict() {
    let (server, ctx) = server(CodeStrategy::default());
    common::create_test_mapping(&ctx.repository, "taken", "https://first.com", None).await;

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://second.com", "slug": "taken" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "slug_taken");
    assert_eq!(body["error"]["details"]["field"], "slug");

    let kept = ctx.repository.find_by_code("taken").await.unwrap().unwrap();
    assert_eq!(kept.original_url, "https://first.com");
    assert_eq!(ctx.repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_url");
    assert_eq!(body["error"]["details"]["field"], "url");
    assert!(ctx.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_url_with_control_character_is_rejected() {
    let (server, ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com/a\nb", "slug": "nl" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    assert!(ctx.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_missing_url_is_invalid_url() {
    let (server, _ctx) = server(CodeStrategy::default());

    let response = server.post("/url/shorten").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_shorten_invalid_slug() {
    let (server, ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com", "slug": "has space" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_slug");
    assert_eq!(body["error"]["details"]["field"], "slug");
    assert!(ctx.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_negative_expiration() {
    let (server, _ctx) = server(CodeStrategy::default());

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com", "expires_in_days": -1 }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_expiration");
    assert_eq!(body["error"]["details"]["field"], "expires_in_days");
}

#[tokio::test]
async fn test_shorten_with_expiration() {
    let (server, ctx) = server(CodeStrategy::default());
    let now = ctx.clock.now();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com", "expires_in_days": 7 }))
        .await;

    response.assert_status_ok();
    let body = response.json::<ShortenResponse>();
    assert_eq!(body.expires_at, Some(now + chrono::TimeDelta::days(7)));
}

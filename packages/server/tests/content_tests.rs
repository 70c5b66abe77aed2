//! End-to-end tests for `/api/content` and `/health` against a mocked Storyblok API.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestHarness, STORYBLOK_SPACE, STORYBLOK_TOKEN};

#[tokio::test]
async fn single_mode_returns_first_story_content() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .and(query_param("token", STORYBLOK_TOKEN))
        .and(query_param("space_id", STORYBLOK_SPACE))
        .and(query_param("version", "draft"))
        .and(query_param("starts_with", "en/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [{"full_slug": "en/about", "content": {"a": 1}}]
        })))
        .expect(1)
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness
        .post_json("/api/content", json!({"url": "en/about"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"content": {"a": 1}}));
}

#[tokio::test]
async fn single_mode_via_query_string() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .and(query_param("starts_with", "en/blog/post 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [{"content": {"title": "Post"}}]
        })))
        .expect(1)
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness
        .request(Method::GET, "/api/content?url=en%2Fblog%2Fpost%201")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"content": {"title": "Post"}}));
}

#[tokio::test]
async fn single_mode_without_stories_is_not_found() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": []})))
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness
        .post_json("/api/content", json!({"url": "en/missing"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "No stories found for this URL.");
}

#[tokio::test]
async fn single_mode_with_null_stories_is_not_found() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": null})))
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness
        .post_json("/api/content", json!({"url": "en/x"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "No stories found for this URL.");
}

#[tokio::test]
async fn list_mode_relays_stories_unchanged() {
    let harness = TestHarness::new().await;
    let stories = json!([
        {"name": "Home", "full_slug": "en/home", "content": {"component": "page", "body": []}},
        {"name": "About", "full_slug": "en/about", "tag_list": ["team"], "position": -10}
    ]);

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .and(query_param_is_missing("starts_with"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": stories.clone(),
            "cv": 1700000000,
            "rels": []
        })))
        .expect(1)
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness.request(Method::GET, "/api/content").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "stories": stories }));
}

#[tokio::test]
async fn post_without_url_is_bad_request() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": []})))
        .expect(0)
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness.post_json("/api/content", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "URL is required.");
}

#[tokio::test]
async fn missing_credentials_are_misconfigured_without_upstream_calls() {
    let mut harness = TestHarness::new().await;
    harness.config.storyblok.preview_token = None;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": []})))
        .expect(0)
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness.request(Method::GET, "/api/content").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"], "Storyblok credentials not configured.");
}

#[tokio::test]
async fn upstream_failure_carries_body_text() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&harness.storyblok)
        .await;

    let (status, response) = harness
        .post_json("/api/content", json!({"url": "en/home"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"], "Storyblok API error (401): Unauthorized");
}

#[tokio::test]
async fn wrong_method_is_405() {
    let harness = TestHarness::new().await;

    let (status, response) = harness.request(Method::DELETE, "/api/content").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response["error"], "Method Not Allowed");
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let harness = TestHarness::new().await;

    let (status, response) = harness.request(Method::GET, "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn health_reports_configured_pipelines() {
    let mut harness = TestHarness::new().await;

    let (status, response) = harness.request(Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"status": "ok", "audit": true, "content": true}));

    harness.config.gemini.api_key = None;
    harness.config.storyblok.space_id = None;

    let (_, response) = harness.request(Method::GET, "/health").await;
    assert_eq!(response, json!({"status": "ok", "audit": false, "content": false}));
}

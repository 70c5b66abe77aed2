//! Test harness: the real router wired to wiremock stand-ins for Gemini and Storyblok.
//!
//! Every test gets its own mock servers, so expectations never leak between tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server_core::{kernel::ServerDeps, server::build_app, Config};
use tower::ServiceExt;
use wiremock::MockServer;

pub const GEMINI_KEY: &str = "test-gemini-key";
pub const STORYBLOK_TOKEN: &str = "test-preview-token";
pub const STORYBLOK_SPACE: &str = "424242";

pub struct TestHarness {
    pub gemini: MockServer,
    pub storyblok: MockServer,
    pub config: Config,
}

impl TestHarness {
    /// Fully configured harness. Retries are disabled so each upstream
    /// failure maps to exactly one request.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let gemini = MockServer::start().await;
        let storyblok = MockServer::start().await;

        let mut config = Config::default();
        config.gemini.api_key = Some(GEMINI_KEY.to_string());
        config.gemini.base_url = gemini.uri();
        config.storyblok.space_id = Some(STORYBLOK_SPACE.to_string());
        config.storyblok.preview_token = Some(STORYBLOK_TOKEN.to_string());
        config.storyblok.base_url = storyblok.uri();
        config.upstream_timeout = Duration::from_secs(5);
        config.upstream_max_attempts = 1;

        Self {
            gemini,
            storyblok,
            config,
        }
    }

    /// Path the Gemini client posts to for the configured model.
    pub fn gemini_path(&self) -> String {
        format!("/models/{}:generateContent", self.config.gemini.model)
    }

    pub fn app(&self) -> Router {
        let deps = ServerDeps::from_config(&self.config).expect("deps from test config");
        build_app(deps)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn request(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app()
            .oneshot(request)
            .await
            .expect("failed to make request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

/// A `generateContent` success envelope carrying `text`.
pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}

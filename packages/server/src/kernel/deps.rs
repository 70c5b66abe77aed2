//! Server dependencies for the pipelines (using traits for testability)
//!
//! This module provides the dependency container every request handler reads.
//! All external services use trait abstractions to enable testing.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest, GenerateContentResponse};
use storyblok_client::{StoriesQuery, Story, StoryblokClient};

use crate::config::Config;
use crate::domains::audit::AuditSettings;
use crate::kernel::{BaseAI, BaseContentSource, RetryPolicy};

// =============================================================================
// Client adapters (implement the Base* traits)
// =============================================================================

#[async_trait]
impl BaseAI for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> gemini_client::Result<GenerateContentResponse> {
        GeminiClient::generate_content(self, request).await
    }
}

#[async_trait]
impl BaseContentSource for StoryblokClient {
    async fn list_stories(&self, query: &StoriesQuery) -> storyblok_client::Result<Vec<Story>> {
        StoryblokClient::list_stories(self, query).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every request.
///
/// A `None` service means its credentials were not configured; the matching
/// pipeline answers Server-Misconfigured without touching the network.
#[derive(Clone)]
pub struct ServerDeps {
    pub ai: Option<Arc<dyn BaseAI>>,
    pub content: Option<Arc<dyn BaseContentSource>>,
    pub audit: AuditSettings,
    pub retry: RetryPolicy,
}

impl ServerDeps {
    pub fn new(
        ai: Option<Arc<dyn BaseAI>>,
        content: Option<Arc<dyn BaseContentSource>>,
        audit: AuditSettings,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            ai,
            content,
            audit,
            retry,
        }
    }

    /// Build real clients from configuration. Services whose credentials are
    /// missing are left unset.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ai: Option<Arc<dyn BaseAI>> = match &config.gemini.api_key {
            Some(key) => {
                let client = GeminiClient::new(key.clone())
                    .with_base_url(config.gemini.base_url.clone())
                    .with_model(config.gemini.model.clone())
                    .with_timeout(config.upstream_timeout)
                    .context("Failed to create Gemini client")?;
                Some(Arc::new(client))
            }
            None => None,
        };

        let content: Option<Arc<dyn BaseContentSource>> = match (
            &config.storyblok.space_id,
            &config.storyblok.preview_token,
        ) {
            (Some(space_id), Some(token)) => {
                let client = StoryblokClient::new(token.clone(), space_id.clone())
                    .with_base_url(config.storyblok.base_url.clone())
                    .with_version(config.storyblok.version.clone())
                    .with_timeout(config.upstream_timeout)
                    .context("Failed to create Storyblok client")?;
                Some(Arc::new(client))
            }
            _ => None,
        };

        let audit = AuditSettings {
            structured_output: config.gemini.structured_output,
            grounding: config.gemini.grounding,
        };
        let retry = RetryPolicy::default().with_max_attempts(config.upstream_max_attempts);

        Ok(Self::new(ai, content, audit, retry))
    }
}

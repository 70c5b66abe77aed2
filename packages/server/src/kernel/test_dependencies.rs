// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use gemini_client::{GeminiError, GenerateContentRequest, GenerateContentResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyblok_client::{StoriesQuery, Story, StoryblokError};

use super::{BaseAI, BaseContentSource, RetryPolicy, ServerDeps};
use crate::domains::audit::AuditSettings;

// =============================================================================
// Mock AI
// =============================================================================

/// Scripted Gemini stand-in. Responses are consumed in order; once the script
/// runs out every call fails with a network error.
#[derive(Clone, Default)]
pub struct MockAI {
    responses: Arc<Mutex<VecDeque<gemini_client::Result<GenerateContentResponse>>>>,
    calls: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response whose first candidate carries `text`
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_response(GenerateContentResponse::from_text(text))
    }

    /// Queue a raw response envelope
    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: GeminiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Get all requests that were sent to the AI
    pub fn calls(&self) -> Vec<GenerateContentRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// User-turn text of the nth call
    pub fn prompt(&self, index: usize) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .get(index)
            .and_then(|req| req.contents.first())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> gemini_client::Result<GenerateContentResponse> {
        // Record the call
        self.calls.lock().unwrap().push(request.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GeminiError::Network("no scripted response".into())))
    }
}

// =============================================================================
// Mock Content Source
// =============================================================================

#[derive(Clone, Default)]
pub struct MockContentSource {
    responses: Arc<Mutex<VecDeque<storyblok_client::Result<Vec<Story>>>>>,
    calls: Arc<Mutex<Vec<StoriesQuery>>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a listing built from raw story JSON values
    pub fn with_stories(self, stories: Vec<serde_json::Value>) -> Self {
        let stories = stories.into_iter().map(Story).collect();
        self.responses.lock().unwrap().push_back(Ok(stories));
        self
    }

    pub fn with_error(self, error: StoryblokError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<StoriesQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseContentSource for MockContentSource {
    async fn list_stories(&self, query: &StoriesQuery) -> storyblok_client::Result<Vec<Story>> {
        self.calls.lock().unwrap().push(query.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StoryblokError::Network("no scripted response".into())))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for a ServerDeps wired to mocks. Services left unset behave as
/// unconfigured.
#[derive(Default)]
pub struct TestDependencies {
    pub ai: Option<MockAI>,
    pub content: Option<MockContentSource>,
    pub audit: AuditSettings,
    pub retry: Option<RetryPolicy>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Set a mock content source
    pub fn mock_content(mut self, content: MockContentSource) -> Self {
        self.content = Some(content);
        self
    }

    pub fn audit_settings(mut self, audit: AuditSettings) -> Self {
        self.audit = audit;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Convert into ServerDeps. Retries are off unless a policy was given.
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.ai.map(|ai| Arc::new(ai) as Arc<dyn BaseAI>),
            self.content
                .map(|content| Arc::new(content) as Arc<dyn BaseContentSource>),
            self.audit,
            self.retry.unwrap_or_else(RetryPolicy::none),
        )
    }
}

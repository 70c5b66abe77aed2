// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (what to prompt for, how to narrow stories) lives in the domains.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseContentSource)

use async_trait::async_trait;
use gemini_client::{GenerateContentRequest, GenerateContentResponse};
use storyblok_client::{StoriesQuery, Story};

// =============================================================================
// AI Trait (Infrastructure - Gemini generateContent)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Issue one generateContent call and return the raw envelope.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> gemini_client::Result<GenerateContentResponse>;
}

// =============================================================================
// Content Source Trait (Infrastructure - CMS stories)
// =============================================================================

#[async_trait]
pub trait BaseContentSource: Send + Sync {
    /// List stories, optionally narrowed by slug prefix.
    async fn list_stories(&self, query: &StoriesQuery) -> storyblok_client::Result<Vec<Story>>;
}

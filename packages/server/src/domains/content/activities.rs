//! Content proxy activity: narrow a Storyblok listing to what the caller asked for.

use serde_json::Value;
use storyblok_client::StoriesQuery;
use tracing::info;

use super::models::{ContentLookup, ContentResponse};
use crate::common::ApiError;
use crate::kernel::{with_retry, ServerDeps};

pub async fn fetch_content(
    deps: &ServerDeps,
    lookup: ContentLookup,
) -> Result<ContentResponse, ApiError> {
    let source = deps
        .content
        .as_ref()
        .ok_or(ApiError::Misconfigured("Storyblok credentials"))?;

    let query = match &lookup {
        ContentLookup::Single(url) => StoriesQuery::starts_with(url.clone()),
        ContentLookup::All => StoriesQuery::all(),
    };

    let stories = with_retry(&deps.retry, "storyblok.list_stories", || {
        source.list_stories(&query)
    })
    .await?;

    match lookup {
        ContentLookup::Single(url) => {
            let story = stories
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::NotFound("No stories found for this URL.".to_string()))?;

            info!(url = %url, slug = story.full_slug().unwrap_or_default(), "Story resolved");

            let content = story.content().cloned().unwrap_or(Value::Null);
            Ok(ContentResponse::Entry { content })
        }
        ContentLookup::All => {
            info!(count = stories.len(), "Stories listed");
            Ok(ContentResponse::Listing { stories })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockContentSource, RetryPolicy, TestDependencies};
    use serde_json::json;
    use std::time::Duration;
    use storyblok_client::StoryblokError;

    #[tokio::test]
    async fn test_single_returns_first_content() {
        let source = MockContentSource::new().with_stories(vec![
            json!({"full_slug": "en/about", "content": {"a": 1}}),
            json!({"full_slug": "en/about/team", "content": {"b": 2}}),
        ]);
        let deps = TestDependencies::new().mock_content(source.clone()).into_deps();

        let response = fetch_content(&deps, ContentLookup::Single("en/about".into()))
            .await
            .unwrap();

        assert_eq!(response, ContentResponse::Entry { content: json!({"a": 1}) });
        assert_eq!(source.calls()[0].starts_with.as_deref(), Some("en/about"));
    }

    #[tokio::test]
    async fn test_single_without_stories_is_not_found() {
        let source = MockContentSource::new().with_stories(vec![]);
        let deps = TestDependencies::new().mock_content(source).into_deps();

        let err = fetch_content(&deps, ContentLookup::Single("missing".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_story_without_content_is_null() {
        let source = MockContentSource::new().with_stories(vec![json!({"full_slug": "x"})]);
        let deps = TestDependencies::new().mock_content(source).into_deps();

        let response = fetch_content(&deps, ContentLookup::Single("x".into()))
            .await
            .unwrap();

        assert_eq!(response, ContentResponse::Entry { content: Value::Null });
    }

    #[tokio::test]
    async fn test_listing_is_relayed_unchanged() {
        let stories = vec![json!({"slug": "a", "extra": [1, 2]}), json!({"slug": "b"})];
        let source = MockContentSource::new().with_stories(stories.clone());
        let deps = TestDependencies::new().mock_content(source.clone()).into_deps();

        let response = fetch_content(&deps, ContentLookup::All).await.unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "stories": stories })
        );
        assert!(source.calls()[0].starts_with.is_none());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let deps = TestDependencies::new().into_deps();

        let err = fetch_content(&deps, ContentLookup::All).await.unwrap_err();

        assert_eq!(err.to_string(), "Storyblok credentials not configured.");
    }

    #[tokio::test]
    async fn test_upstream_error_carries_body() {
        let source = MockContentSource::new().with_error(StoryblokError::Api {
            status: 401,
            message: "Unauthorized".into(),
        });
        let deps = TestDependencies::new().mock_content(source).into_deps();

        let err = fetch_content(&deps, ContentLookup::All).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::UpstreamCall { status: Some(401), ref message, .. } if message == "Unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let source = MockContentSource::new()
            .with_error(StoryblokError::Api {
                status: 502,
                message: "Bad Gateway".into(),
            })
            .with_stories(vec![json!({"content": {"a": 1}})]);
        let deps = TestDependencies::new()
            .mock_content(source.clone())
            .retry(RetryPolicy {
                max_attempts: 2,
                base_delay: Duration::ZERO,
                max_delay: Duration::ZERO,
            })
            .into_deps();

        let response = fetch_content(&deps, ContentLookup::Single("en".into()))
            .await
            .unwrap();

        assert_eq!(response, ContentResponse::Entry { content: json!({"a": 1}) });
        assert_eq!(source.call_count(), 2);
    }
}

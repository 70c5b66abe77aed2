//! Content domain - read-only proxy over the Storyblok content-delivery API

pub mod activities;
pub mod models;

pub use activities::fetch_content;
pub use models::{ContentLookup, ContentRequest, ContentResponse};

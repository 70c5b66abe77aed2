// Accessibility Audit & Content Proxy - API Core
//
// Two stateless pipelines behind one axum server: accessibility audits via
// Gemini and a read-only proxy over the Storyblok content-delivery API.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
